//! Errors reported before a search starts.

use std::fmt;

use tilepath_core::{Point, Range};

/// Which end of a run an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Invalid run configuration. An unreachable target is not an error; it is
/// reported as [`SearchOutcome::NoPath`](crate::SearchOutcome::NoPath).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint lies outside the searched range.
    OutOfBounds {
        endpoint: Endpoint,
        pos: Point,
        range: Range,
    },
    /// An endpoint is not walkable. Callers must pick walkable endpoints.
    Unwalkable { endpoint: Endpoint, pos: Point },
}

impl SearchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::OutOfBounds { endpoint, .. } | Self::Unwalkable { endpoint, .. } => *endpoint,
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                endpoint,
                pos,
                range,
            } => write!(f, "{endpoint} {pos} outside search range {range}"),
            Self::Unwalkable { endpoint, pos } => write!(f, "{endpoint} {pos} is not walkable"),
        }
    }
}

impl std::error::Error for SearchError {}
