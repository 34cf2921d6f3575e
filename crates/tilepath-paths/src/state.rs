use log::warn;

/// Sentinel parent index meaning "no parent".
const NONE: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-cell record
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    visited: bool,
    explored: bool,
    on_path: bool,
    parent: usize,
    priority: f64,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            generation: 0,
            visited: false,
            explored: false,
            on_path: false,
            parent: NONE,
            priority: f64::INFINITY,
        }
    }
}

/// Per-cell search flags, as read by a renderer after a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFlags {
    pub start: bool,
    pub target: bool,
    /// The cell was popped from the frontier and its neighbors examined.
    pub visited: bool,
    /// The cell served as predecessor for at least one discovered neighbor.
    pub explored: bool,
    /// The cell lies on the marked route.
    pub on_path: bool,
}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Search bookkeeping overlaid on a grid, indexed by flat cell index.
///
/// [`SearchState::reset`] bumps a generation counter; a record stamped with
/// an older generation reads as a fresh one, so nothing from a previous run
/// is ever observed.
#[derive(Debug, Clone)]
pub struct SearchState {
    nodes: Vec<Node>,
    generation: u32,
    len: usize,
}

impl SearchState {
    pub fn new(len: usize) -> Self {
        Self {
            nodes: vec![Node::default(); len],
            generation: 1,
            len,
        }
    }

    /// Invalidate every record and size the overlay for `len` cells.
    pub fn reset(&mut self, len: usize) {
        if len > self.nodes.len() {
            self.nodes.resize(len, Node::default());
        }
        self.len = len;
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale stamps could now look current.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, idx: usize) -> Option<&Node> {
        if idx >= self.len {
            return None;
        }
        self.nodes
            .get(idx)
            .filter(|n| n.generation == self.generation)
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        let generation = self.generation;
        let n = &mut self.nodes[idx];
        if n.generation != generation {
            *n = Node {
                generation,
                ..Node::default()
            };
        }
        n
    }

    pub fn is_visited(&self, idx: usize) -> bool {
        self.node(idx).is_some_and(|n| n.visited)
    }

    pub fn is_explored(&self, idx: usize) -> bool {
        self.node(idx).is_some_and(|n| n.explored)
    }

    pub fn is_on_path(&self, idx: usize) -> bool {
        self.node(idx).is_some_and(|n| n.on_path)
    }

    pub fn parent(&self, idx: usize) -> Option<usize> {
        self.node(idx)
            .map(|n| n.parent)
            .filter(|&p| p != NONE)
    }

    /// The last priority computed for `idx` this run.
    pub fn priority(&self, idx: usize) -> Option<f64> {
        self.node(idx)
            .map(|n| n.priority)
            .filter(|p| p.is_finite())
    }

    pub(crate) fn set_visited(&mut self, idx: usize) {
        self.node_mut(idx).visited = true;
    }

    pub(crate) fn set_explored(&mut self, idx: usize) {
        self.node_mut(idx).explored = true;
    }

    pub(crate) fn set_priority(&mut self, idx: usize, priority: f64) {
        self.node_mut(idx).priority = priority;
    }

    /// Record `parent` for `idx` unless it already has one. Returns whether
    /// the link was set.
    pub(crate) fn link(&mut self, idx: usize, parent: usize) -> bool {
        let n = self.node_mut(idx);
        if n.parent != NONE {
            return false;
        }
        n.parent = parent;
        true
    }

    /// Walk parent links from `from`, returning `from` followed by each
    /// ancestor up to the root. Stops after `len` cells, which a chain
    /// without cycles never reaches past.
    pub fn chain(&self, from: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = Some(from);
        while let Some(i) = cur {
            if out.len() >= self.len {
                break;
            }
            out.push(i);
            cur = self.parent(i);
        }
        out
    }

    /// Mark the ancestors of `from` as on the route, stopping at the cell
    /// with no parent (the start). `from` itself is not marked.
    ///
    /// Returns the number of cells marked, or `None` if `from` has no parent,
    /// in which case nothing is marked.
    pub fn reconstruct(&mut self, from: usize) -> Option<usize> {
        let Some(first) = self.parent(from) else {
            warn!("route reconstruction: cell {from} has no parent");
            return None;
        };
        let mut marked = 0;
        let mut cur = Some(first);
        while let Some(i) = cur {
            if marked >= self.len {
                break;
            }
            self.node_mut(i).on_path = true;
            marked += 1;
            cur = self.parent(i);
        }
        Some(marked)
    }

    /// Flags for `idx` (start/target are filled in by the caller).
    pub(crate) fn flags(&self, idx: usize) -> CellFlags {
        match self.node(idx) {
            Some(n) => CellFlags {
                visited: n.visited,
                explored: n.explored,
                on_path: n.on_path,
                ..CellFlags::default()
            },
            None => CellFlags::default(),
        }
    }
}
