//! **gridstar-core** — geometry types shared by the gridstar crates.
//!
//! [`Point`] identifies a grid cell by value; [`Range`] is the rectangle a
//! grid graph is built on.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
