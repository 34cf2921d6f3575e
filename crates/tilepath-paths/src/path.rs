use tilepath_core::Point;

/// An ordered route of cells from start to target, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Point>,
}

impl Path {
    pub(crate) fn new(cells: Vec<Point>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells }
    }

    /// Number of cells, endpoints included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves: one less than the number of cells.
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.first().copied()
    }

    pub fn target(&self) -> Option<Point> {
        self.cells.last().copied()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.cells.iter()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.cells.contains(&p)
    }

    /// Whether every consecutive pair of cells is one orthogonal step apart.
    pub fn is_contiguous(&self) -> bool {
        self.cells.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }
}

impl From<Path> for Vec<Point> {
    fn from(p: Path) -> Self {
        p.cells
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
