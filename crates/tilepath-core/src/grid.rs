//! A walkability grid for map representation.
//!
//! [`Grid`] stores exactly one [`Cell`] per coordinate of its
//! `width × height` rectangle in row-major order. It is built once per map
//! and never mutated afterwards: regenerating a map means building a new
//! grid.

use crate::error::GridError;
use crate::geom::{Point, Range};

/// Character for a walkable cell in [`Grid::from_ascii`].
pub const FLOOR: char = '.';
/// Character for a blocked cell in [`Grid::from_ascii`].
pub const WALL: char = '#';

/// A single grid position and whether it can be stepped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub walkable: bool,
}

impl Cell {
    pub const fn new(pos: Point, walkable: bool) -> Self {
        Self { pos, walkable }
    }
}

/// A `width × height` grid of [`Cell`]s with origin at (0, 0).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "GridRepr", try_from = "GridRepr")
)]
pub struct Grid {
    bounds: Range,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid, asking `walkable` about every position in row-major
    /// order. Negative sizes produce an empty grid.
    pub fn build(width: i32, height: i32, mut walkable: impl FnMut(Point) -> bool) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        let cells = bounds
            .iter()
            .map(|pos| Cell::new(pos, walkable(pos)))
            .collect();
        Self { bounds, cells }
    }

    /// Build a grid where every cell is walkable.
    pub fn open(width: i32, height: i32) -> Self {
        Self::build(width, height, |_| true)
    }

    /// Parse a grid from rows of `.` (walkable) and `#` (blocked).
    ///
    /// Blank leading/trailing lines are ignored; every other line must have
    /// the same width.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s.trim_matches('\n').lines().map(str::trim_end).collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut walkable = Vec::with_capacity(width * lines.len());
        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::InconsistentRow {
                    line: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                match ch {
                    FLOOR => walkable.push(true),
                    WALL => walkable.push(false),
                    _ => {
                        return Err(GridError::InvalidRune {
                            ch,
                            pos: Point::new(x as i32, y as i32),
                        });
                    }
                }
            }
        }
        Ok(Self::build(width as i32, lines.len() as i32, |p| {
            walkable[p.y as usize * width + p.x as usize]
        }))
    }

    /// The bounding range `[0, width) × [0, height)`.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn get(&self, p: Point) -> Option<Cell> {
        self.bounds.index_of(p).map(|i| self.cells[i])
    }

    /// Get the cell at a point.
    pub fn cell_at(&self, p: Point) -> Result<Cell, GridError> {
        self.get(p).ok_or_else(|| GridError::OutOfBounds {
            pos: p,
            width: self.width(),
            height: self.height(),
        })
    }

    /// Whether `p` is inside the grid and walkable.
    pub fn is_walkable(&self, p: Point) -> bool {
        self.get(p).is_some_and(|c| c.walkable)
    }

    /// In-bounds orthogonal neighbours of `p` (up, left, right, down),
    /// walkable or not. Diagonals are never produced.
    pub fn neighbors_of(&self, p: Point) -> impl Iterator<Item = Cell> + '_ {
        p.neighbors_4().into_iter().filter_map(|n| self.get(n))
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// serde representation
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    width: i32,
    height: i32,
    walkable: Vec<bool>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(g: Grid) -> Self {
        Self {
            width: g.width(),
            height: g.height(),
            walkable: g.cells.iter().map(|c| c.walkable).collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, GridError> {
        let expected = Range::new(0, 0, r.width.max(0), r.height.max(0)).len();
        if r.walkable.len() != expected {
            return Err(GridError::CellCount {
                expected,
                found: r.walkable.len(),
            });
        }
        let w = r.width.max(0) as usize;
        Ok(Self::build(r.width, r.height, |p| {
            r.walkable[p.y as usize * w + p.x as usize]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
...#
.#..
....";

    #[test]
    fn build_holds_one_cell_per_coordinate() {
        let g = Grid::build(4, 3, |p| p.x != 3);
        assert_eq!(g.len(), 12);
        for (cell, p) in g.iter().zip(g.bounds().iter()) {
            assert_eq!(cell.pos, p);
        }
        assert!(!g.is_walkable(Point::new(3, 0)));
        assert!(g.is_walkable(Point::new(2, 2)));
        assert_eq!(g.walkable_count(), 9);
    }

    #[test]
    fn negative_size_is_empty() {
        let g = Grid::build(-2, 5, |_| true);
        assert!(g.is_empty());
        assert_eq!(g.width(), 0);
    }

    #[test]
    fn cell_at_out_of_bounds() {
        let g = Grid::open(3, 3);
        assert_eq!(
            g.cell_at(Point::new(1, 2)),
            Ok(Cell::new(Point::new(1, 2), true))
        );
        assert_eq!(
            g.cell_at(Point::new(3, 0)),
            Err(GridError::OutOfBounds {
                pos: Point::new(3, 0),
                width: 3,
                height: 3
            })
        );
        assert!(g.cell_at(Point::new(0, -1)).is_err());
    }

    #[test]
    fn neighbors_are_orthogonal_and_in_bounds() {
        let g = Grid::open(3, 3);
        let corner: Vec<Point> = g.neighbors_of(Point::ZERO).map(|c| c.pos).collect();
        assert_eq!(corner, vec![Point::new(1, 0), Point::new(0, 1)]);

        let center: Vec<Point> = g.neighbors_of(Point::new(1, 1)).map(|c| c.pos).collect();
        assert_eq!(
            center,
            vec![
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn neighbors_include_blocked_cells() {
        let g = Grid::from_ascii(ROOM).unwrap();
        let n: Vec<Cell> = g.neighbors_of(Point::new(1, 0)).collect();
        assert_eq!(n.len(), 3);
        assert!(n.iter().any(|c| c.pos == Point::new(1, 1) && !c.walkable));
    }

    #[test]
    fn parse_ascii() {
        let g = Grid::from_ascii(ROOM).unwrap();
        assert_eq!(g.bounds(), Range::new(0, 0, 4, 3));
        assert!(!g.is_walkable(Point::new(3, 0)));
        assert!(!g.is_walkable(Point::new(1, 1)));
        assert!(g.is_walkable(Point::new(3, 2)));
    }

    #[test]
    fn parse_inconsistent_row() {
        let err = Grid::from_ascii("...\n..").unwrap_err();
        assert_eq!(
            err,
            GridError::InconsistentRow {
                line: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_invalid_rune() {
        let err = Grid::from_ascii("..\n.x").unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidRune {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_ascii("..#\n#..").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"walkable\""));
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn grid_rejects_wrong_cell_count() {
        let json = r#"{"width":2,"height":2,"walkable":[true,false,true]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }
}
