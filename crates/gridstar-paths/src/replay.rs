//! Replay cursor — steps through a recorded search trace.
//!
//! [`Replay`] holds no timing of its own; the presentation layer decides
//! when to advance. [`Replay::cell_at`] tells it how to paint a cell at the
//! current step.

use gridstar_core::Point;

use crate::graph::GridGraph;
use crate::snapshot::Snapshot;

/// Role of a single grid cell at one step of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Obstacle,
    Start,
    Goal,
    /// Node extracted at this step.
    Current,
    Path,
    Visited,
    Frontier,
}

/// Cursor over the snapshots of one run.
#[derive(Debug, Clone)]
pub struct Replay<'t> {
    trace: &'t [Snapshot],
    idx: usize,
}

impl<'t> Replay<'t> {
    /// Start a replay at the first snapshot.
    pub fn new(trace: &'t [Snapshot]) -> Self {
        Self { trace, idx: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Index of the current step.
    #[inline]
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Snapshot at the current step, `None` for an empty trace.
    pub fn current(&self) -> Option<&'t Snapshot> {
        self.trace.get(self.idx)
    }

    /// Whether the cursor is on the terminal snapshot.
    pub fn is_at_end(&self) -> bool {
        !self.trace.is_empty() && self.idx + 1 == self.trace.len()
    }

    /// Advance one step. Returns `false` when already at the end.
    pub fn step_forward(&mut self) -> bool {
        if self.idx + 1 < self.trace.len() {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    /// Go back one step. Returns `false` when already at the start.
    pub fn step_back(&mut self) -> bool {
        if self.idx > 0 {
            self.idx -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to step `n`, clamped to the last snapshot.
    pub fn set_step(&mut self, n: usize) {
        self.idx = n.min(self.trace.len().saturating_sub(1));
    }

    pub fn rewind(&mut self) {
        self.idx = 0;
    }

    /// Classify `p` at the current step.
    ///
    /// Precedence, highest first: obstacle, start, goal, current, path,
    /// visited, frontier.
    pub fn cell_at(&self, graph: &GridGraph, start: Point, goal: Point, p: Point) -> CellState {
        if graph.is_obstacle(p) {
            return CellState::Obstacle;
        }
        if p == start {
            return CellState::Start;
        }
        if p == goal {
            return CellState::Goal;
        }
        let Some(snap) = self.current() else {
            return CellState::Empty;
        };
        if p == snap.current {
            CellState::Current
        } else if snap.on_path(p) {
            CellState::Path
        } else if snap.is_visited(p) {
            CellState::Visited
        } else if snap.in_frontier(p) {
            CellState::Frontier
        } else {
            CellState::Empty
        }
    }
}
