//! Error types for grid construction and lookups.

use std::fmt;

use crate::geom::Point;

/// Errors that can occur when building or querying a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate lies outside `[0, width) × [0, height)`.
    OutOfBounds { pos: Point, width: i32, height: i32 },
    /// An ASCII map row does not match the width of the first row.
    InconsistentRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// An ASCII map contains a character other than `.` or `#`.
    InvalidRune { ch: char, pos: Point },
    /// A serialized grid carries the wrong number of cells for its size.
    CellCount { expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "position {pos} outside {width}x{height} grid")
            }
            Self::InconsistentRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "grid row {line} has width {found}, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "grid contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::CellCount { expected, found } => {
                write!(f, "grid expects {expected} cells, found {found}")
            }
        }
    }
}

impl std::error::Error for GridError {}
