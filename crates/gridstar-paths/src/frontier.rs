//! Open set for A*: a keyed priority queue with decrease-key.

use std::cmp::{Ordering, Reverse};
use std::fmt;

use gridstar_core::Point;
use priority_queue::PriorityQueue;

/// Queue key: priority first, then insertion sequence for ties.
#[derive(Debug, Clone, Copy)]
struct Key {
    priority: f64,
    seq: u64,
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

/// Min-priority container holding at most one entry per node.
///
/// Entries with equal priority come out in insertion order. Lowering a
/// node's priority keeps its original place in that order.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    // PriorityQueue pops the highest priority first, hence `Reverse`.
    queue: PriorityQueue<Point, Reverse<Key>>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove every entry and restart the tie-break sequence.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.next_seq = 0;
    }

    #[inline]
    pub fn contains(&self, node: Point) -> bool {
        self.queue.get_priority(&node).is_some()
    }

    /// Current priority of `node`, if it is in the frontier.
    pub fn priority(&self, node: Point) -> Option<f64> {
        self.queue.get_priority(&node).map(|Reverse(k)| k.priority)
    }

    /// Add `node` with `priority`.
    ///
    /// `node` must not already be present: in that case nothing changes and
    /// `false` is returned. Use [`Frontier::decrease_priority`] to update.
    pub fn insert(&mut self, node: Point, priority: f64) -> bool {
        if self.contains(node) {
            return false;
        }
        let key = Key {
            priority,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.push(node, Reverse(key));
        true
    }

    /// Remove and return the node with the smallest priority.
    pub fn extract_min(&mut self) -> Result<Point, FrontierError> {
        self.queue
            .pop()
            .map(|(node, _)| node)
            .ok_or(FrontierError::Empty)
    }

    /// Lower the priority of `node` to `priority`.
    ///
    /// Only takes effect if `priority` is strictly less than the stored one;
    /// returns whether an update happened. Absent nodes are left alone.
    pub fn decrease_priority(&mut self, node: Point, priority: f64) -> bool {
        let Some(&Reverse(old)) = self.queue.get_priority(&node) else {
            return false;
        };
        if priority.partial_cmp(&old.priority) != Some(Ordering::Less) {
            return false;
        }
        let key = Key {
            priority,
            seq: old.seq,
        };
        self.queue.change_priority(&node, Reverse(key));
        true
    }

    /// Frontier nodes in extraction order.
    pub fn nodes(&self) -> Vec<Point> {
        self.queue.clone().into_sorted_vec()
    }
}

/// Errors returned by [`Frontier`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierError {
    /// `extract_min` was called on an empty frontier.
    Empty,
}

impl fmt::Display for FrontierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "frontier: extract_min on empty frontier"),
        }
    }
}

impl std::error::Error for FrontierError {}
