use log::{debug, info};
use tilepath_core::{Grid, Point, Range};

use crate::error::{Endpoint, SearchError};
use crate::frontier::{Frontier, TieBreak};
use crate::heuristic::{DistanceSum, Heuristic};
use crate::path::Path;
use crate::state::{CellFlags, SearchState};
use crate::traits::Pather;

/// Tunables for a [`Pathfinder`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// How the frontier breaks ties between equal priorities.
    pub tie_break: TieBreak,
}

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Overlay reset and frontier seeded with the start.
    Initialized,
    /// At least one step taken, target not yet reached.
    Running,
    /// The target was reached.
    PathFound,
    /// The frontier ran dry before the target was reached.
    NoPath,
}

impl SearchStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::PathFound | Self::NoPath)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Path),
    NoPath,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoPath => None,
        }
    }

    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NoPath => None,
        }
    }
}

/// Counters for the last run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells popped from the frontier and expanded.
    pub expanded: usize,
    /// Cells pushed onto the frontier, the start included.
    pub pushed: usize,
}

#[derive(Debug, Clone, Copy)]
struct Endpoints {
    start: usize,
    target: usize,
}

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Best-first search from a start cell to a target cell.
///
/// A `Pathfinder` owns the per-cell overlay and the frontier and reuses them
/// between runs; every run starts from a fully reset overlay. After a run
/// its flags stay readable through [`Pathfinder::cell_flags`] until the next
/// [`Pathfinder::begin`].
///
/// Each step pops the best frontier cell, marks it visited and examines its
/// neighbors in order:
///
/// - the target ends the search; its parent becomes the popped cell, and
///   the popped cell's ancestors are marked as the route;
/// - explored, visited and blocked neighbors are skipped;
/// - anything else gets its priority recomputed, a parent if it has none
///   yet, and a frontier slot if not already queued. The popped cell is
///   marked explored.
#[derive(Debug, Clone)]
pub struct Pathfinder<H = DistanceSum> {
    rng: Range,
    heuristic: H,
    state: SearchState,
    frontier: Frontier,
    nbuf: Vec<Point>,
    endpoints: Option<Endpoints>,
    status: SearchStatus,
    stats: SearchStats,
    path: Option<Path>,
}

impl Pathfinder<DistanceSum> {
    /// Create a pathfinder for `rng` using the [`DistanceSum`] heuristic.
    pub fn new(rng: Range) -> Self {
        Self::with_heuristic(rng, DistanceSum)
    }

    /// Create a pathfinder sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }
}

impl<H: Heuristic> Pathfinder<H> {
    pub fn with_heuristic(rng: Range, heuristic: H) -> Self {
        let len = rng.len();
        Self {
            rng,
            heuristic,
            state: SearchState::new(len),
            frontier: Frontier::new(len, TieBreak::default()),
            nbuf: Vec::with_capacity(4),
            endpoints: None,
            status: SearchStatus::Initialized,
            stats: SearchStats::default(),
            path: None,
        }
    }

    /// Apply `config` to subsequent runs.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.frontier.set_tie_break(config.tie_break);
    }

    pub fn config(&self) -> SearchConfig {
        SearchConfig {
            tie_break: self.frontier.tie_break(),
        }
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Replace the searched rectangle. Any previous run is discarded.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.state.reset(rng.len());
        self.frontier.clear(rng.len());
        self.endpoints = None;
        self.status = SearchStatus::Initialized;
        self.stats = SearchStats::default();
        self.path = None;
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    /// Validate the endpoints, reset all bookkeeping and seed the frontier
    /// with `start`.
    ///
    /// If `start == target` the run finishes immediately with a
    /// single-cell path.
    pub fn begin<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        target: Point,
    ) -> Result<SearchStatus, SearchError> {
        if pather.range() != self.rng {
            self.set_range(pather.range());
        }
        let si = self.checked_idx(pather, Endpoint::Start, start)?;
        let ti = self.checked_idx(pather, Endpoint::Target, target)?;

        self.state.reset(self.rng.len());
        self.frontier.clear(self.rng.len());
        self.endpoints = Some(Endpoints {
            start: si,
            target: ti,
        });
        self.stats = SearchStats::default();
        self.path = None;
        debug!("search {start} -> {target} on {}", self.rng);

        if si == ti {
            self.path = Some(Path::new(vec![start]));
            self.status = SearchStatus::PathFound;
            info!("path found: start is the target");
            return Ok(self.status);
        }

        let priority = self.heuristic.priority(start, start, target);
        self.state.set_priority(si, priority);
        self.frontier.push(si, priority);
        self.stats.pushed = 1;
        self.status = SearchStatus::Initialized;
        Ok(self.status)
    }

    /// Expand one cell. Returns the status after the step; terminal
    /// statuses are sticky.
    ///
    /// `pather` must describe the same grid that was given to
    /// [`Pathfinder::begin`].
    pub fn step<P: Pather>(&mut self, pather: &P) -> SearchStatus {
        let Some(ends) = self.endpoints else {
            return self.status;
        };
        if self.status.is_terminal() {
            return self.status;
        }
        self.status = SearchStatus::Running;

        let Some(ci) = self.frontier.pop_best() else {
            self.finish_no_path(ends);
            return self.status;
        };
        self.state.set_visited(ci);
        self.stats.expanded += 1;

        let current = self.rng.point_at(ci);
        let start = self.rng.point_at(ends.start);
        let target = self.rng.point_at(ends.target);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        let mut found = false;
        for &np in nbuf.iter() {
            let Some(ni) = self.rng.index_of(np) else {
                continue;
            };
            if ni == ends.target {
                self.state.link(ni, ci);
                found = true;
                break;
            }
            if self.state.is_explored(ni) || !pather.passable(np) || self.state.is_visited(ni) {
                continue;
            }

            let priority = self.heuristic.priority(np, start, target);
            self.state.set_priority(ni, priority);
            self.state.link(ni, ci);
            self.state.set_explored(ci);
            if self.frontier.push(ni, priority) {
                self.stats.pushed += 1;
            }
        }
        self.nbuf = nbuf;

        if found {
            self.finish_found(ends, ci);
        } else if self.frontier.is_empty() {
            self.finish_no_path(ends);
        }
        self.status
    }

    /// Run a search to completion.
    pub fn run<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        target: Point,
    ) -> Result<SearchOutcome, SearchError> {
        self.begin(pather, start, target)?;
        while !self.step(pather).is_terminal() {}
        Ok(match self.path.clone() {
            Some(path) => SearchOutcome::Found(path),
            None => SearchOutcome::NoPath,
        })
    }

    fn checked_idx<P: Pather>(
        &self,
        pather: &P,
        endpoint: Endpoint,
        pos: Point,
    ) -> Result<usize, SearchError> {
        let idx = self.rng.index_of(pos).ok_or(SearchError::OutOfBounds {
            endpoint,
            pos,
            range: self.rng,
        })?;
        if !pather.passable(pos) {
            return Err(SearchError::Unwalkable { endpoint, pos });
        }
        Ok(idx)
    }

    fn finish_found(&mut self, ends: Endpoints, predecessor: usize) {
        self.state.reconstruct(predecessor);
        let mut cells: Vec<Point> = self
            .state
            .chain(ends.target)
            .into_iter()
            .map(|i| self.rng.point_at(i))
            .collect();
        cells.reverse();
        debug_assert_eq!(cells.first().copied(), Some(self.rng.point_at(ends.start)));
        info!(
            "path found: {} cells, {} expanded",
            cells.len(),
            self.stats.expanded
        );
        self.path = Some(Path::new(cells));
        self.status = SearchStatus::PathFound;
    }

    fn finish_no_path(&mut self, ends: Endpoints) {
        info!(
            "no path found from {} to {} ({} expanded)",
            self.rng.point_at(ends.start),
            self.rng.point_at(ends.target),
            self.stats.expanded
        );
        self.status = SearchStatus::NoPath;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The route of the last run, if one was found.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn start(&self) -> Option<Point> {
        self.endpoints.map(|e| self.rng.point_at(e.start))
    }

    pub fn target(&self) -> Option<Point> {
        self.endpoints.map(|e| self.rng.point_at(e.target))
    }

    /// The overlay of the last run.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Display flags for `p` after the last run. Out-of-range points get
    /// all-false flags.
    pub fn cell_flags(&self, p: Point) -> CellFlags {
        let Some(idx) = self.rng.index_of(p) else {
            return CellFlags::default();
        };
        let mut flags = self.state.flags(idx);
        if let Some(e) = self.endpoints {
            flags.start = idx == e.start;
            flags.target = idx == e.target;
        }
        flags
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.cell_flags(p).visited
    }

    pub fn is_on_path(&self, p: Point) -> bool {
        self.cell_flags(p).on_path
    }

    pub fn parent_of(&self, p: Point) -> Option<Point> {
        let idx = self.rng.index_of(p)?;
        self.state.parent(idx).map(|i| self.rng.point_at(i))
    }

    pub fn priority_of(&self, p: Point) -> Option<f64> {
        self.rng
            .index_of(p)
            .and_then(|idx| self.state.priority(idx))
    }

    /// Row-major iterator over the cells expanded in the last run.
    pub fn visited(&self) -> impl Iterator<Item = Point> + '_ {
        self.rng.iter().filter(|&p| self.is_visited(p))
    }
}

/// Run a single search over `grid` with default settings.
pub fn run_search(grid: &Grid, start: Point, target: Point) -> Result<SearchOutcome, SearchError> {
    Pathfinder::for_grid(grid).run(grid, start, target)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::{HashSet, VecDeque};

    const W: i32 = 8;
    const H: i32 = 6;

    fn arb_grid() -> impl Strategy<Value = Grid> {
        prop::collection::vec(prop::bool::weighted(0.7), (W * H) as usize)
            .prop_map(|cells| Grid::build(W, H, |p| cells[(p.y * W + p.x) as usize]))
    }

    fn arb_point() -> impl Strategy<Value = Point> {
        (0..W, 0..H).prop_map(|(x, y)| Point::new(x, y))
    }

    fn reachable(g: &Grid, from: Point, to: Point) -> bool {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);
        while let Some(p) = queue.pop_front() {
            if p == to {
                return true;
            }
            for n in g.neighbors_of(p) {
                if n.walkable && seen.insert(n.pos) {
                    queue.push_back(n.pos);
                }
            }
        }
        false
    }

    proptest! {
        #[test]
        fn finds_a_route_iff_one_exists(g in arb_grid(), s in arb_point(), t in arb_point()) {
            prop_assume!(g.is_walkable(s) && g.is_walkable(t));
            let out = run_search(&g, s, t).unwrap();
            prop_assert_eq!(out.is_found(), reachable(&g, s, t));
        }

        #[test]
        fn routes_are_valid(g in arb_grid(), s in arb_point(), t in arb_point()) {
            prop_assume!(g.is_walkable(s) && g.is_walkable(t));
            if let SearchOutcome::Found(path) = run_search(&g, s, t).unwrap() {
                prop_assert_eq!(path.start(), Some(s));
                prop_assert_eq!(path.target(), Some(t));
                prop_assert!(path.is_contiguous());
                prop_assert!(path.iter().all(|&p| g.is_walkable(p)));
                let distinct: HashSet<_> = path.iter().collect();
                prop_assert_eq!(distinct.len(), path.len());
            }
        }

        #[test]
        fn each_cell_expanded_at_most_once(g in arb_grid(), s in arb_point(), t in arb_point()) {
            prop_assume!(g.is_walkable(s) && g.is_walkable(t));
            let mut pf = Pathfinder::for_grid(&g);
            pf.run(&g, s, t).unwrap();
            let stats = pf.stats();
            prop_assert_eq!(stats.expanded, pf.visited().count());
            prop_assert!(stats.pushed <= g.walkable_count());
            prop_assert!(stats.expanded <= stats.pushed);
            prop_assert!(pf.visited().all(|p| g.is_walkable(p)));
        }

        #[test]
        fn parent_chain_ends_at_start(g in arb_grid(), s in arb_point(), t in arb_point()) {
            prop_assume!(g.is_walkable(s) && g.is_walkable(t) && s != t);
            let mut pf = Pathfinder::for_grid(&g);
            if pf.run(&g, s, t).unwrap().is_found() {
                let mut cur = t;
                let mut steps = 0;
                while let Some(p) = pf.parent_of(cur) {
                    cur = p;
                    steps += 1;
                    prop_assert!(steps <= g.len());
                }
                prop_assert_eq!(cur, s);
            }
        }

        #[test]
        fn runs_are_deterministic(g in arb_grid(), s in arb_point(), t in arb_point()) {
            prop_assume!(g.is_walkable(s) && g.is_walkable(t));
            let mut a = Pathfinder::for_grid(&g);
            let mut b = Pathfinder::for_grid(&g);
            let first = a.run(&g, s, t).unwrap();
            // Reuse `b` across a run on a different grid first.
            b.run(&Grid::open(W, H), Point::ZERO, Point::new(W - 1, H - 1)).unwrap();
            let second = b.run(&g, s, t).unwrap();
            prop_assert_eq!(first, second);
            prop_assert!(a.visited().eq(b.visited()));
            for p in g.bounds().iter() {
                prop_assert_eq!(a.cell_flags(p), b.cell_flags(p));
            }
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = SearchConfig {
            tie_break: TieBreak::LatestInserted,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn flags_round_trip() {
        let g = Grid::open(2, 2);
        let mut pf = Pathfinder::for_grid(&g);
        pf.run(&g, Point::new(0, 0), Point::new(1, 1)).unwrap();
        let flags = pf.cell_flags(Point::new(0, 0));
        let json = serde_json::to_string(&flags).unwrap();
        let back: CellFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flags);
    }
}
