//! Geometric layout for N-up composition
//!
//! - Aspect-preserving fit of a source page into a target rectangle
//! - Partitioning the canvas into grid cells per layout mode

mod geometry;
mod grid;

pub use geometry::*;
pub use grid::*;
