//! Shared demo model: generate a random map, search it and draw the result
//! as text.

use std::fmt::Write as _;

use rand::prelude::*;
use tilepath_core::{Grid, Point};
use tilepath_mapgen::{GeneratedMap, MapGen, MapGenConfig, MapGenError};
use tilepath_paths::{Pathfinder, SearchError, SearchOutcome};

/// How a cell is drawn, in decreasing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Start,
    Target,
    Route,
    Visited,
    Wall,
    Floor,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Self::Start => 'S',
            Self::Target => 'T',
            Self::Route => '*',
            Self::Visited => '+',
            Self::Wall => '#',
            Self::Floor => '.',
        }
    }
}

/// Classify `p` after a search run.
pub fn tile_at(grid: &Grid, pf: &Pathfinder, p: Point) -> Tile {
    let flags = pf.cell_flags(p);
    if flags.start {
        Tile::Start
    } else if flags.target {
        Tile::Target
    } else if flags.on_path {
        Tile::Route
    } else if flags.visited {
        Tile::Visited
    } else if !grid.is_walkable(p) {
        Tile::Wall
    } else {
        Tile::Floor
    }
}

/// Draw the grid row by row, one glyph per cell.
pub fn render(grid: &Grid, pf: &Pathfinder) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height().max(0) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            out.push(tile_at(grid, pf, Point::new(x, y)).glyph());
        }
        out.push('\n');
    }
    out
}

/// Errors surfaced by the demo loop.
#[derive(Debug)]
pub enum DemoError {
    MapGen(MapGenError),
    Search(SearchError),
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MapGen(e) => write!(f, "map generation: {e}"),
            Self::Search(e) => write!(f, "search: {e}"),
        }
    }
}

impl std::error::Error for DemoError {}

impl From<MapGenError> for DemoError {
    fn from(e: MapGenError) -> Self {
        Self::MapGen(e)
    }
}

impl From<SearchError> for DemoError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// A map plus the pathfinder that last searched it.
pub struct Demo<R: Rng> {
    mapgen: MapGen<R>,
    pathfinder: Pathfinder,
    map: Option<GeneratedMap>,
    outcome: Option<SearchOutcome>,
}

impl<R: Rng> Demo<R> {
    pub fn new(config: MapGenConfig, rng: R) -> Self {
        Self {
            mapgen: MapGen::new(config, rng),
            pathfinder: Pathfinder::new(Default::default()),
            map: None,
            outcome: None,
        }
    }

    /// Replace the map with a fresh one and search it.
    pub fn regenerate(&mut self) -> Result<&SearchOutcome, DemoError> {
        let map = self.mapgen.generate()?;
        let outcome = self.pathfinder.run(&map.grid, map.start, map.target)?;
        self.map = Some(map);
        Ok(self.outcome.insert(outcome))
    }

    pub fn map(&self) -> Option<&GeneratedMap> {
        self.map.as_ref()
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    /// Text frame for the current map, with a one-line summary.
    pub fn frame(&self) -> String {
        let (Some(map), Some(outcome)) = (&self.map, &self.outcome) else {
            return String::new();
        };
        let mut out = render(&map.grid, &self.pathfinder);
        let stats = self.pathfinder.stats();
        let _ = match outcome {
            SearchOutcome::Found(path) => writeln!(
                out,
                "{} -> {}: {} steps, {} cells expanded",
                map.start,
                map.target,
                path.steps(),
                stats.expanded
            ),
            SearchOutcome::NoPath => writeln!(
                out,
                "{} -> {}: no path, {} cells expanded",
                map.start, map.target, stats.expanded
            ),
        };
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn render_uses_display_precedence() {
        let grid = Grid::from_ascii(
            "
...
##.
...",
        )
        .unwrap();
        let mut pf = Pathfinder::for_grid(&grid);
        pf.run(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(render(&grid, &pf), "S**\n##+\n..T\n");
    }

    #[test]
    fn blocked_cells_render_as_walls() {
        let grid = Grid::from_ascii("..#\n...").unwrap();
        let pf = Pathfinder::for_grid(&grid);
        assert_eq!(tile_at(&grid, &pf, Point::new(2, 0)), Tile::Wall);
        assert_eq!(tile_at(&grid, &pf, Point::new(0, 1)), Tile::Floor);
    }

    #[test]
    fn regenerate_produces_a_frame() {
        let config = MapGenConfig {
            width: 12,
            height: 6,
            ..MapGenConfig::default()
        };
        let mut demo = Demo::new(config, StdRng::seed_from_u64(9));
        assert!(demo.frame().is_empty());
        demo.regenerate().unwrap();
        let frame = demo.frame();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[..6].iter().all(|l| l.chars().count() == 12));
        assert_eq!(frame.matches('S').count(), 1);
        let map = demo.map().unwrap();
        assert_eq!(demo.pathfinder().start(), Some(map.start));
    }
}
