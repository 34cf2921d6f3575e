//! Random map generation for search demos and tests.
//!
//! [`MapGen`] scatters blocked cells uniformly at random, then picks a start
//! and a target. Maps whose start or target land on a blocked cell are
//! thrown away and regenerated, so every [`GeneratedMap`] is a valid search
//! input. Whether the target is actually reachable is left to the search.

use std::fmt;

use log::{debug, info};
use rand::prelude::*;
use tilepath_core::{Grid, Point};

/// Parameters for [`MapGen`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapGenConfig {
    pub width: i32,
    pub height: i32,
    /// Probability in `[0, 1]` that a cell is blocked.
    pub blocked_chance: f64,
    /// Maps to try before giving up on walkable endpoints.
    pub max_attempts: usize,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 30,
            blocked_chance: 1.0 / 3.0,
            max_attempts: 1000,
        }
    }
}

/// A grid together with walkable start and target cells.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMap {
    pub grid: Grid,
    pub start: Point,
    pub target: Point,
    /// Number of maps generated, this one included.
    pub attempts: usize,
}

/// Errors that can occur when generating a map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapGenError {
    /// Width or height is not positive.
    EmptyGrid { width: i32, height: i32 },
    /// `blocked_chance` is outside `[0, 1]`.
    InvalidChance(f64),
    /// No map with walkable endpoints turned up.
    Exhausted { attempts: usize },
}

impl fmt::Display for MapGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "map size {width}x{height} has no cells")
            }
            Self::InvalidChance(p) => write!(f, "blocked chance {p} is not a probability"),
            Self::Exhausted { attempts } => {
                write!(f, "no map with walkable endpoints after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for MapGenError {}

/// Random map generator.
pub struct MapGen<R: Rng> {
    pub rng: R,
    pub config: MapGenConfig,
}

impl<R: Rng> MapGen<R> {
    pub fn new(config: MapGenConfig, rng: R) -> Self {
        Self { rng, config }
    }

    /// A grid where each cell is independently blocked with
    /// `config.blocked_chance`.
    pub fn random_grid(&mut self) -> Result<Grid, MapGenError> {
        self.check()?;
        let chance = self.config.blocked_chance;
        let rng = &mut self.rng;
        Ok(Grid::build(self.config.width, self.config.height, |_| {
            !rng.random_bool(chance)
        }))
    }

    /// Generate maps until one has a walkable start and target, both chosen
    /// uniformly among all cells. They may coincide.
    pub fn generate(&mut self) -> Result<GeneratedMap, MapGenError> {
        self.check()?;
        for attempt in 1..=self.config.max_attempts {
            let grid = self.random_grid()?;
            let start = self.random_cell(&grid);
            let target = self.random_cell(&grid);
            if grid.is_walkable(start) && grid.is_walkable(target) {
                info!(
                    "generated map: {} cells, {} walkable",
                    grid.len(),
                    grid.walkable_count()
                );
                return Ok(GeneratedMap {
                    grid,
                    start,
                    target,
                    attempts: attempt,
                });
            }
            debug!("attempt {attempt}: blocked endpoint, regenerating");
        }
        Err(MapGenError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    fn random_cell(&mut self, grid: &Grid) -> Point {
        grid.bounds().point_at(self.rng.random_range(0..grid.len()))
    }

    fn check(&self) -> Result<(), MapGenError> {
        let MapGenConfig {
            width,
            height,
            blocked_chance,
            ..
        } = self.config;
        if width <= 0 || height <= 0 {
            return Err(MapGenError::EmptyGrid { width, height });
        }
        if !(0.0..=1.0).contains(&blocked_chance) {
            return Err(MapGenError::InvalidChance(blocked_chance));
        }
        Ok(())
    }
}
