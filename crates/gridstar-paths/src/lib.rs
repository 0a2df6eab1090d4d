//! Recorded A* search on weighted 2D grids.
//!
//! This crate computes A* shortest paths over an 8-connected grid with
//! obstacles and records every step of the search so it can be replayed:
//!
//! - **Grid graph** with random or explicit obstacles ([`GridGraph`])
//! - **Frontier** min-priority open set with decrease-key ([`Frontier`])
//! - **A\* stepper** that records one [`Snapshot`] per expansion ([`AstarStepper::run`])
//! - **Replay** cursor and cell classification for playback ([`Replay`])
//!
//! ```
//! use gridstar_core::Point;
//! use gridstar_paths::{AstarStepper, GridGraph};
//!
//! let graph = GridGraph::with_obstacles(3, 3, []).unwrap();
//! let mut stepper = AstarStepper::new(&graph);
//! let trace = stepper.run(Point::new(0, 0), Point::new(2, 2)).unwrap();
//! assert_eq!(trace.last().unwrap().path.len(), 3);
//! assert!(stepper.search_completed());
//! ```
//!
//! # Trait hierarchy
//!
//! | Trait | Provides |
//! |---|---|
//! | [`Pather`] | neighbors, bounds and passability |
//! | [`WeightedPather`] : [`Pather`] | edge costs |
//! | [`AstarPather`] : [`WeightedPather`] | admissible heuristic |

mod astar;
mod config;
mod distance;
mod frontier;
mod graph;
mod neighbors;
mod replay;
mod snapshot;
mod traits;

pub use astar::{AstarStepper, Endpoint, EndpointFault, Exhaustion, SearchError, SearchStatus};
pub use config::{DEFAULT_MAX_ITERATIONS, GridConfig, StepperConfig};
pub use distance::{euclidean, manhattan};
pub use frontier::{Frontier, FrontierError};
pub use graph::{GraphError, GridGraph};
pub use neighbors::{DIAGONAL_COST, Edge, Neighbors, ORTHOGONAL_COST};
pub use replay::{CellState, Replay};
pub use snapshot::Snapshot;
pub use traits::{AstarPather, Pather, WeightedPather};
