use tilepath_core::{Grid, Point, Range};

/// The grid-facing side of a search: bounds, walkability and neighbor
/// enumeration.
pub trait Pather {
    /// The rectangle searched over. Points outside it are never visited.
    fn range(&self) -> Range;

    /// Whether a search may step onto `p`.
    fn passable(&self, p: Point) -> bool;

    /// Append the neighbors of `p` into `buf`. The caller clears `buf` before
    /// calling. Neighbors need not be passable; the search filters them.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

impl Pather for Grid {
    fn range(&self) -> Range {
        self.bounds()
    }

    fn passable(&self, p: Point) -> bool {
        self.is_walkable(p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(self.neighbors_of(p).map(|c| c.pos));
    }
}
