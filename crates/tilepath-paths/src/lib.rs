//! Best-first shortest-path search on 2D walkability grids.
//!
//! The entry point is [`Pathfinder`], which owns a per-cell
//! [`SearchState`] overlay and a [`Frontier`] and reuses them between runs.
//! For one-off queries use [`run_search`]:
//!
//! ```
//! use tilepath_core::{Grid, Point};
//! use tilepath_paths::{run_search, SearchOutcome};
//!
//! let grid = Grid::from_ascii("...\n##.\n...").unwrap();
//! let out = run_search(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert_eq!(out.path().map(|p| p.len()), Some(5));
//! assert!(matches!(out, SearchOutcome::Found(_)));
//! ```
//!
//! Movement is orthogonal with uniform step cost. Expansion order is
//! driven by a [`Heuristic`]; the default [`DistanceSum`] scores a cell by
//! its straight-line distance to the start plus its straight-line distance
//! to the target.
//!
//! "No path" is a normal outcome ([`SearchOutcome::NoPath`]); only bad
//! endpoints produce a [`SearchError`].

mod distance;
mod error;
mod frontier;
mod heuristic;
mod path;
mod pathfinder;
mod state;
mod traits;

pub use distance::{euclidean, manhattan};
pub use error::{Endpoint, SearchError};
pub use frontier::{Frontier, TieBreak};
pub use heuristic::{DistanceSum, Heuristic, priority};
pub use path::Path;
pub use pathfinder::{
    Pathfinder, SearchConfig, SearchOutcome, SearchStats, SearchStatus, run_search,
};
pub use state::{CellFlags, SearchState};
pub use traits::Pather;
