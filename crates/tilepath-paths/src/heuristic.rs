//! Priority scores guiding expansion order. Lower scores are expanded first.

use tilepath_core::Point;

use crate::distance::euclidean;

/// Scores a cell for the frontier, given the run's start and goal.
pub trait Heuristic {
    fn priority(&self, cell: Point, start: Point, goal: Point) -> f64;
}

/// Straight-line distance back to the start plus straight-line distance to
/// the goal.
///
/// This is not the A* `g + h` score: the start term is recomputed from
/// geometry instead of accumulated along discovered edges, so a cell's
/// score never depends on the route that reached it. The search it drives
/// is best-first and does not guarantee a shortest route once the route has
/// to bend away from the straight line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DistanceSum;

impl Heuristic for DistanceSum {
    #[inline]
    fn priority(&self, cell: Point, start: Point, goal: Point) -> f64 {
        euclidean(cell, start) + euclidean(cell, goal)
    }
}

impl<F> Heuristic for F
where
    F: Fn(Point, Point, Point) -> f64,
{
    #[inline]
    fn priority(&self, cell: Point, start: Point, goal: Point) -> f64 {
        self(cell, start, goal)
    }
}

/// [`DistanceSum`] as a free function.
#[inline]
pub fn priority(cell: Point, start: Point, goal: Point) -> f64 {
    DistanceSum.priority(cell, start, goal)
}
