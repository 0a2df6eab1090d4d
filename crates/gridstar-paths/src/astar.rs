//! A* search that records one [`Snapshot`] per frontier extraction.

use std::collections::{HashMap, HashSet};
use std::fmt;

use gridstar_core::Point;

use crate::config::StepperConfig;
use crate::frontier::{Frontier, FrontierError};
use crate::graph::GridGraph;
use crate::snapshot::Snapshot;
use crate::traits::AstarPather;

/// Lifecycle of a stepper: `Idle → Running → {Succeeded, Exhausted}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    Idle,
    Running,
    /// The goal was extracted from the frontier.
    Succeeded,
    /// The run ended without reaching the goal.
    Exhausted(Exhaustion),
}

/// Why a run ended without reaching the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exhaustion {
    /// Every reachable node was expanded: the goal is unreachable.
    FrontierEmpty,
    /// The iteration ceiling was hit first.
    IterationCeiling,
}

/// Per-run bookkeeping, rebuilt by every [`AstarStepper::run`].
#[derive(Debug, Default)]
struct SearchState {
    /// `None` marks the start node.
    predecessor: HashMap<Point, Option<Point>>,
    best_cost: HashMap<Point, f64>,
    /// Expansion order.
    visited: Vec<Point>,
    closed: HashSet<Point>,
    trace: Vec<Snapshot>,
}

impl SearchState {
    fn clear(&mut self) {
        self.predecessor.clear();
        self.best_cost.clear();
        self.visited.clear();
        self.closed.clear();
        self.trace.clear();
    }

    fn visit(&mut self, p: Point) {
        if self.closed.insert(p) {
            self.visited.push(p);
        }
    }

    fn path_to(&self, target: Point) -> Vec<Point> {
        if !self.predecessor.contains_key(&target) {
            return Vec::new();
        }
        let mut path = vec![target];
        let mut cur = target;
        while let Some(&Some(prev)) = self.predecessor.get(&cur) {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }
}

/// Step-recording A* search bound to a shared, read-only graph.
///
/// Each call to [`run`](Self::run) starts from scratch and returns the full
/// trace of the search, ready for step-by-step replay. Independent steppers
/// may share the same graph.
pub struct AstarStepper<'g, P: AstarPather = GridGraph> {
    graph: &'g P,
    config: StepperConfig,
    frontier: Frontier,
    state: SearchState,
    status: SearchStatus,
    iterations: usize,
    // scratch buffer for neighbor queries
    nbuf: Vec<Point>,
}

impl<'g, P: AstarPather> AstarStepper<'g, P> {
    /// Create a stepper with the default iteration ceiling.
    pub fn new(graph: &'g P) -> Self {
        Self::with_config(graph, StepperConfig::default())
    }

    pub fn with_config(graph: &'g P, config: StepperConfig) -> Self {
        Self {
            graph,
            config,
            frontier: Frontier::new(),
            state: SearchState::default(),
            status: SearchStatus::Idle,
            iterations: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Clear the frontier, search state and trace, and go back to `Idle`.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.state.clear();
        self.status = SearchStatus::Idle;
        self.iterations = 0;
    }

    /// Run A* from `start` to `goal` and return the recorded trace.
    ///
    /// An unreachable goal is not an error: the run ends as
    /// [`SearchStatus::Exhausted`] and the final snapshot has an empty path.
    /// Endpoints outside the graph or on an obstacle are rejected before
    /// any search work, leaving the stepper reset and `Idle`.
    pub fn run(&mut self, start: Point, goal: Point) -> Result<&[Snapshot], SearchError> {
        self.reset();
        self.check_endpoint(Endpoint::Start, start)?;
        self.check_endpoint(Endpoint::Goal, goal)?;

        log::debug!("a* run from {start} to {goal}");
        self.status = SearchStatus::Running;
        self.frontier.insert(start, 0.0);
        self.state.best_cost.insert(start, 0.0);
        self.state.predecessor.insert(start, None);

        let graph = self.graph;
        let mut current = start;

        while !self.frontier.is_empty() && self.iterations < self.config.max_iterations {
            self.iterations += 1;
            current = self.frontier.extract_min()?;

            if current == goal {
                self.status = SearchStatus::Succeeded;
                let path = self.state.path_to(goal);
                self.record(current, path);
                break;
            }

            self.state.visit(current);
            let path = self.state.path_to(current);
            self.record(current, path);

            let current_g = self.state.best_cost.get(&current).copied().unwrap_or(0.0);
            log::trace!(
                "expand {current} g={current_g:.3} frontier={}",
                self.frontier.len()
            );

            self.nbuf.clear();
            graph.neighbors(current, &mut self.nbuf);

            for &n in &self.nbuf {
                if self.state.closed.contains(&n) {
                    continue;
                }
                let tentative = current_g + graph.cost(current, n);
                if self
                    .state
                    .best_cost
                    .get(&n)
                    .is_some_and(|&known| tentative >= known)
                {
                    continue;
                }

                self.state.best_cost.insert(n, tentative);
                self.state.predecessor.insert(n, Some(current));
                let priority = tentative + graph.estimate(n, goal);
                if self.frontier.contains(n) {
                    self.frontier.decrease_priority(n, priority);
                } else {
                    self.frontier.insert(n, priority);
                }
            }
        }

        if self.status == SearchStatus::Running {
            let reason = if self.frontier.is_empty() {
                Exhaustion::FrontierEmpty
            } else {
                Exhaustion::IterationCeiling
            };
            self.status = SearchStatus::Exhausted(reason);
            self.state.trace.push(Snapshot {
                current,
                frontier_nodes: Vec::new(),
                visited_nodes: self.state.visited.clone(),
                path: Vec::new(),
            });
        }

        log::debug!(
            "a* run finished: {:?} after {} iterations, {} snapshots",
            self.status,
            self.iterations,
            self.state.trace.len()
        );
        Ok(&self.state.trace)
    }

    fn check_endpoint(&self, which: Endpoint, point: Point) -> Result<(), SearchError> {
        let fault = if !self.graph.contains(point) {
            EndpointFault::OutOfBounds
        } else if !self.graph.passable(point) {
            EndpointFault::Obstacle
        } else {
            return Ok(());
        };
        Err(SearchError::InvalidEndpoint {
            which,
            point,
            fault,
        })
    }

    fn record(&mut self, current: Point, path: Vec<Point>) {
        self.state.trace.push(Snapshot {
            current,
            frontier_nodes: self.frontier.nodes(),
            visited_nodes: self.state.visited.clone(),
            path,
        });
    }

    /// Path from the start of the last run to `target`, or an empty path if
    /// `target` was never reached.
    pub fn reconstruct_path(&self, target: Point) -> Vec<Point> {
        self.state.path_to(target)
    }

    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Whether the last run reached its goal.
    #[inline]
    pub fn search_completed(&self) -> bool {
        self.status == SearchStatus::Succeeded
    }

    /// Snapshots recorded by the last run.
    pub fn trace(&self) -> &[Snapshot] {
        &self.state.trace
    }

    /// Final start-to-goal path of the last run; empty unless it succeeded.
    pub fn path(&self) -> &[Point] {
        match self.state.trace.last() {
            Some(last) if self.search_completed() => &last.path,
            _ => &[],
        }
    }

    /// Frontier extractions performed by the last run.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Lowest known cost from the start to `p` in the last run.
    pub fn best_cost(&self, p: Point) -> Option<f64> {
        self.state.best_cost.get(&p).copied()
    }

    /// Predecessor of `p` on its best known path. `None` for the start and
    /// for nodes not reached.
    pub fn predecessor(&self, p: Point) -> Option<Point> {
        self.state.predecessor.get(&p).copied().flatten()
    }

    pub fn graph(&self) -> &'g P {
        self.graph
    }

    pub fn config(&self) -> StepperConfig {
        self.config
    }
}

/// Which endpoint of a search was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    OutOfBounds,
    Obstacle,
}

/// Errors returned by [`AstarStepper::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal is outside the grid or on an obstacle.
    InvalidEndpoint {
        which: Endpoint,
        point: Point,
        fault: EndpointFault,
    },
    /// Frontier misuse inside the search loop.
    Frontier(FrontierError),
}

impl From<FrontierError> for SearchError {
    fn from(e: FrontierError) -> Self {
        Self::Frontier(e)
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint {
                which,
                point,
                fault,
            } => {
                let which = match which {
                    Endpoint::Start => "start",
                    Endpoint::Goal => "goal",
                };
                let fault = match fault {
                    EndpointFault::OutOfBounds => "is out of bounds",
                    EndpointFault::Obstacle => "is an obstacle",
                };
                write!(f, "a*: {which} {point} {fault}")
            }
            Self::Frontier(e) => write!(f, "a*: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Frontier(e) => Some(e),
            Self::InvalidEndpoint { .. } => None,
        }
    }
}
