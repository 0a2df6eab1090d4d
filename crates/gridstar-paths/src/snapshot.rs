use gridstar_core::Point;

/// One recorded instant of an A* run, frozen when it was taken.
///
/// Non-terminal snapshots are taken right after `current` is extracted and
/// marked visited, before its neighbors are relaxed; `path` then runs from
/// the start to `current`. The terminal snapshot of a successful run holds
/// the full start-to-goal path, and that of an exhausted run an empty path
/// and an empty frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Node extracted at this step.
    pub current: Point,
    /// Frontier contents, in extraction order.
    pub frontier_nodes: Vec<Point>,
    /// Visited nodes, in expansion order.
    pub visited_nodes: Vec<Point>,
    /// Path from the start, both endpoints included.
    pub path: Vec<Point>,
}

impl Snapshot {
    /// Number of moves along `path` (0 for an empty or single-node path).
    pub fn path_steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn in_frontier(&self, p: Point) -> bool {
        self.frontier_nodes.contains(&p)
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.visited_nodes.contains(&p)
    }

    pub fn on_path(&self, p: Point) -> bool {
        self.path.contains(&p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_helpers() {
        let s = Snapshot {
            current: Point::new(1, 0),
            frontier_nodes: vec![Point::new(2, 0)],
            visited_nodes: vec![Point::new(0, 0), Point::new(1, 0)],
            path: vec![Point::new(0, 0), Point::new(1, 0)],
        };
        assert_eq!(s.path_steps(), 1);
        assert!(s.in_frontier(Point::new(2, 0)));
        assert!(!s.in_frontier(Point::new(0, 0)));
        assert!(s.is_visited(Point::new(0, 0)));
        assert!(s.on_path(Point::new(1, 0)));
        assert!(!s.on_path(Point::new(2, 0)));
    }

    #[test]
    fn empty_path_has_no_steps() {
        let s = Snapshot {
            current: Point::ZERO,
            frontier_nodes: Vec::new(),
            visited_nodes: Vec::new(),
            path: Vec::new(),
        };
        assert_eq!(s.path_steps(), 0);
    }
}
