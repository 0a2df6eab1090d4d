//! Weighted 8-connected grid graph with randomly placed obstacles.

use std::fmt;

use gridstar_core::{Point, Range};
use rand::seq::index;
use rand::{Rng, RngExt};

use crate::distance::{euclidean, manhattan};
use crate::neighbors::{Edge, Neighbors};
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Attempts made by [`GridGraph::pick_endpoints`] to find a well separated
/// pair before falling back to any two passable cells.
const ENDPOINT_ATTEMPTS: usize = 50;

/// A grid of `width × height` cells where every passable cell is linked to
/// its passable 8-neighbors.
///
/// Orthogonal edges cost `1.0` and diagonal edges cost `√2`. Obstacle cells
/// have no edges in either direction. The graph is read-only once built, so
/// several searches can share it.
#[derive(Debug, Clone)]
pub struct GridGraph {
    rng: Range,
    blocked: Vec<bool>,
    obstacle_count: usize,
    adjacency: Vec<Vec<Edge>>,
}

impl GridGraph {
    /// Build a graph and mark `floor(width * height * obstacle_ratio)`
    /// distinct cells, chosen uniformly at random, as obstacles.
    pub fn new(
        width: i32,
        height: i32,
        obstacle_ratio: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, GraphError> {
        let range = Self::checked_range(width, height)?;
        if !(0.0..1.0).contains(&obstacle_ratio) {
            return Err(GraphError::InvalidObstacleRatio(obstacle_ratio));
        }

        let total = range.len();
        let count = ((total as f64 * obstacle_ratio).floor() as usize).min(total);
        let mut blocked = vec![false; total];
        for i in index::sample(rng, total, count).iter() {
            blocked[i] = true;
        }

        Ok(Self::from_blocked(range, blocked))
    }

    /// Build a graph with an explicit obstacle layout. Points outside the
    /// grid are ignored.
    pub fn with_obstacles(
        width: i32,
        height: i32,
        obstacles: impl IntoIterator<Item = Point>,
    ) -> Result<Self, GraphError> {
        let range = Self::checked_range(width, height)?;
        let mut blocked = vec![false; range.len()];
        for p in obstacles {
            if let Some(i) = range.index_of(p) {
                blocked[i] = true;
            }
        }
        Ok(Self::from_blocked(range, blocked))
    }

    fn checked_range(width: i32, height: i32) -> Result<Range, GraphError> {
        if width <= 0 || height <= 0 {
            return Err(GraphError::InvalidDimensions { width, height });
        }
        Ok(Range::with_size(width, height))
    }

    fn from_blocked(range: Range, blocked: Vec<bool>) -> Self {
        let is_open = |p: Point| range.index_of(p).is_some_and(|i| !blocked[i]);
        let mut nb = Neighbors::new();
        let adjacency = range
            .iter()
            .map(|p| {
                if is_open(p) {
                    nb.all(p, is_open).to_vec()
                } else {
                    Vec::new()
                }
            })
            .collect();
        let obstacle_count = blocked.iter().filter(|&&b| b).count();

        log::debug!(
            "built {}x{} grid graph with {} obstacles",
            range.width(),
            range.height(),
            obstacle_count
        );

        Self {
            rng: range,
            blocked,
            obstacle_count,
            adjacency,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.rng.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.rng.height()
    }

    /// The rectangle covered by the graph.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Whether `p` is a cell of this grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.rng.contains(p)
    }

    /// Whether `p` is an obstacle. Points outside the grid are not.
    #[inline]
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.rng.index_of(p).is_some_and(|i| self.blocked[i])
    }

    /// Whether `p` is inside the grid and not an obstacle.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.rng.index_of(p).is_some_and(|i| !self.blocked[i])
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }

    /// Obstacle cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Point> + '_ {
        self.rng.iter().filter(|&p| self.is_obstacle(p))
    }

    /// Passable cells in row-major order.
    pub fn passable_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.rng.iter().filter(|&p| self.is_passable(p))
    }

    /// Outgoing edges of `p`. Empty for obstacles and unknown points.
    pub fn edges(&self, p: Point) -> &[Edge] {
        match self.rng.index_of(p) {
            Some(i) => &self.adjacency[i],
            None => &[],
        }
    }

    /// Neighbors of `p`: orthogonal ones first, then diagonals.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        self.edges(p).iter().map(|e| e.to)
    }

    /// Weight of the edge `from → to`, or `f64::INFINITY` if there is none.
    pub fn cost(&self, from: Point, to: Point) -> f64 {
        self.edges(from)
            .iter()
            .find(|e| e.to == to)
            .map_or(f64::INFINITY, |e| e.cost)
    }

    /// Straight-line distance from `p` to `goal`.
    #[inline]
    pub fn heuristic(&self, p: Point, goal: Point) -> f64 {
        euclidean(p, goal)
    }

    /// Pick a random start and goal among the passable cells.
    ///
    /// Prefers pairs at least `max(3, min(width, height) / 3)` apart in
    /// Manhattan distance; after a bounded number of tries any two distinct
    /// passable cells are accepted. Returns `None` when fewer than two
    /// passable cells exist.
    pub fn pick_endpoints(&self, rng: &mut impl Rng) -> Option<(Point, Point)> {
        let cells: Vec<Point> = self.passable_cells().collect();
        if cells.len() < 2 {
            return None;
        }
        let min_distance = 3.max(self.width().min(self.height()) / 3);

        for _ in 0..ENDPOINT_ATTEMPTS {
            let start = cells[rng.random_range(0..cells.len())];
            let goal = cells[rng.random_range(0..cells.len())];
            if start != goal && manhattan(start, goal) >= min_distance {
                return Some((start, goal));
            }
        }

        let si = rng.random_range(0..cells.len());
        // Draw from the remaining cells so the pair is always distinct.
        let mut gi = rng.random_range(0..cells.len() - 1);
        if gi >= si {
            gi += 1;
        }
        Some((cells[si], cells[gi]))
    }
}

impl Pather for GridGraph {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(GridGraph::neighbors(self, p));
    }

    fn passable(&self, p: Point) -> bool {
        self.is_passable(p)
    }

    fn contains(&self, p: Point) -> bool {
        GridGraph::contains(self, p)
    }
}

impl WeightedPather for GridGraph {
    fn cost(&self, from: Point, to: Point) -> f64 {
        GridGraph::cost(self, from, to)
    }
}

impl AstarPather for GridGraph {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        self.heuristic(from, to)
    }
}

/// Errors that can occur when building a [`GridGraph`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// Width or height is not positive.
    InvalidDimensions { width: i32, height: i32 },
    /// Obstacle ratio outside `[0, 1)`, or not a number.
    InvalidObstacleRatio(f64),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid graph: invalid dimensions {width}x{height}")
            }
            Self::InvalidObstacleRatio(r) => {
                write!(f, "grid graph: obstacle ratio {r} is outside [0, 1)")
            }
        }
    }
}

impl std::error::Error for GraphError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighbors::{DIAGONAL_COST, ORTHOGONAL_COST};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(width: i32, height: i32, ratio: f64, seed: u64) -> GridGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        GridGraph::new(width, height, ratio, &mut rng).unwrap()
    }

    #[test]
    fn obstacle_count_is_floored_ratio() {
        let g = seeded(10, 7, 0.3, 1);
        assert_eq!(g.obstacle_count(), 21);
        assert_eq!(g.obstacles().count(), 21);
        assert_eq!(g.passable_cells().count(), 49);

        let g = seeded(3, 3, 0.99, 2);
        assert_eq!(g.obstacle_count(), 8);
    }

    #[test]
    fn same_seed_same_layout() {
        let a: Vec<Point> = seeded(16, 16, 0.3, 42).obstacles().collect();
        let b: Vec<Point> = seeded(16, 16, 0.3, 42).obstacles().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_bad_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            GridGraph::new(0, 5, 0.1, &mut rng).unwrap_err(),
            GraphError::InvalidDimensions { width: 0, height: 5 }
        );
        assert!(matches!(
            GridGraph::new(5, 5, 1.0, &mut rng),
            Err(GraphError::InvalidObstacleRatio(_))
        ));
        assert!(matches!(
            GridGraph::new(5, 5, -0.1, &mut rng),
            Err(GraphError::InvalidObstacleRatio(_))
        ));
        assert!(matches!(
            GridGraph::new(5, 5, f64::NAN, &mut rng),
            Err(GraphError::InvalidObstacleRatio(_))
        ));
        assert!(GridGraph::with_obstacles(4, -1, []).is_err());
    }

    #[test]
    fn neighbors_exclude_obstacles_and_bounds() {
        for seed in 0..8 {
            let g = seeded(12, 9, 0.35, seed);
            for p in g.passable_cells() {
                for e in g.edges(p) {
                    assert!(g.contains(e.to));
                    assert!(!g.is_obstacle(e.to));
                    let d = e.to - p;
                    if d.x == 0 || d.y == 0 {
                        assert_eq!(e.cost, ORTHOGONAL_COST);
                    } else {
                        assert!((e.cost - std::f64::consts::SQRT_2).abs() < 1e-12);
                    }
                }
            }
            for p in g.obstacles() {
                assert_eq!(g.neighbors(p).count(), 0);
            }
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = seeded(10, 10, 0.3, 7);
        for a in g.passable_cells() {
            for e in g.edges(a) {
                assert_eq!(g.cost(e.to, a), e.cost);
            }
        }
    }

    #[test]
    fn cost_without_edge_is_infinite() {
        let g = GridGraph::with_obstacles(3, 3, [Point::new(1, 1)]).unwrap();
        assert_eq!(g.cost(Point::new(0, 0), Point::new(2, 2)), f64::INFINITY);
        assert_eq!(g.cost(Point::new(0, 0), Point::new(1, 1)), f64::INFINITY);
        assert_eq!(g.cost(Point::new(1, 1), Point::new(0, 0)), f64::INFINITY);
        assert_eq!(g.cost(Point::new(-1, 0), Point::new(0, 0)), f64::INFINITY);
        assert_eq!(g.cost(Point::new(0, 0), Point::new(1, 0)), ORTHOGONAL_COST);
    }

    #[test]
    fn diagonals_cut_corners() {
        // Both flanking cells of (0,0) → (1,1) are blocked.
        let g = GridGraph::with_obstacles(2, 2, [Point::new(1, 0), Point::new(0, 1)]).unwrap();
        let n: Vec<Point> = g.neighbors(Point::new(0, 0)).collect();
        assert_eq!(n, vec![Point::new(1, 1)]);
        assert_eq!(g.cost(Point::new(0, 0), Point::new(1, 1)), DIAGONAL_COST);
    }

    #[test]
    fn neighbor_order_and_unknown_points() {
        let g = GridGraph::with_obstacles(3, 3, []).unwrap();
        let n: Vec<Point> = g.neighbors(Point::new(1, 1)).collect();
        assert_eq!(
            n,
            vec![
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(2, 2),
                Point::new(2, 0),
                Point::new(0, 2),
                Point::new(0, 0),
            ]
        );
        assert_eq!(g.neighbors(Point::new(5, 5)).count(), 0);
        assert!(!g.is_obstacle(Point::new(5, 5)));
        assert!(!g.is_passable(Point::new(5, 5)));
    }

    #[test]
    fn heuristic_is_euclidean() {
        let g = GridGraph::with_obstacles(5, 5, []).unwrap();
        assert!((g.heuristic(Point::new(0, 0), Point::new(3, 4)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn pick_endpoints_distinct_and_passable() {
        let mut rng = StdRng::seed_from_u64(9);
        let g = seeded(32, 32, 0.3, 9);
        for _ in 0..20 {
            let (s, t) = g.pick_endpoints(&mut rng).unwrap();
            assert_ne!(s, t);
            assert!(g.is_passable(s) && g.is_passable(t));
        }

        // Two passable cells adjacent to each other: fallback path.
        let all_but_two = Range::with_size(4, 4)
            .iter()
            .filter(|&p| p != Point::new(0, 0) && p != Point::new(1, 0));
        let g = GridGraph::with_obstacles(4, 4, all_but_two).unwrap();
        let (s, t) = g.pick_endpoints(&mut rng).unwrap();
        assert_ne!(s, t);

        let g = GridGraph::with_obstacles(1, 1, []).unwrap();
        assert_eq!(g.pick_endpoints(&mut rng), None);
    }
}
