use std::f64::consts::SQRT_2;

use gridstar_core::Point;

/// Cost of an orthogonal (cardinal) step.
pub const ORTHOGONAL_COST: f64 = 1.0;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = SQRT_2;

/// Orthogonal offsets, in adjacency order.
const ORTHOGONAL: [Point; 4] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
];

/// Diagonal offsets, in adjacency order.
const DIAGONAL: [Point; 4] = [
    Point::new(1, 1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(-1, -1),
];

/// A directed edge to an adjacent cell.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub to: Point,
    pub cost: f64,
}

/// Neighbor computation helper.
///
/// Enumerates the 8-connected neighborhood of a grid point, orthogonal
/// offsets first then diagonals, filtered by a predicate. Diagonal steps are
/// not restricted by the flanking orthogonal cells.
pub struct Neighbors {
    buf: Vec<Edge>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the weighted 8-directional neighbors of `p`, keeping only those
    /// for which `keep` returns `true`.
    pub fn all(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Edge] {
        self.buf.clear();
        let moves = ORTHOGONAL
            .iter()
            .map(|&d| (d, ORTHOGONAL_COST))
            .chain(DIAGONAL.iter().map(|&d| (d, DIAGONAL_COST)));
        for (d, cost) in moves {
            let n = p + d;
            if keep(n) {
                self.buf.push(Edge { to: n, cost });
            }
        }
        &self.buf
    }
}
