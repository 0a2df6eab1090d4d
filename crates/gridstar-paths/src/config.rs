//! Configuration for building graphs and running searches.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::graph::{GraphError, GridGraph};

/// Safety ceiling on the number of frontier extractions per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Parameters for building a random [`GridGraph`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    /// Fraction of cells turned into obstacles, in `[0, 1)`.
    pub obstacle_ratio: f64,
    /// Fixed seed for obstacle placement. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            obstacle_ratio: 0.3,
            seed: None,
        }
    }
}

impl GridConfig {
    /// Build the graph described by this configuration.
    pub fn build(&self) -> Result<GridGraph, GraphError> {
        match self.seed {
            Some(seed) => GridGraph::new(
                self.width,
                self.height,
                self.obstacle_ratio,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => GridGraph::new(
                self.width,
                self.height,
                self.obstacle_ratio,
                &mut rand::rng(),
            ),
        }
    }
}

/// Parameters for an [`AstarStepper`](crate::AstarStepper).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StepperConfig {
    /// Maximum frontier extractions before a run ends as exhausted.
    pub max_iterations: usize,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
