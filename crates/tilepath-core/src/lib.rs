//! **tilepath-core** — core types for grid-based shortest-path search.
//!
//! This crate provides the geometry primitives and the immutable
//! walkability [`Grid`] that the search and map-generation crates share.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{ORTHOGONAL, Point, Range};
pub use grid::{Cell, Grid};
