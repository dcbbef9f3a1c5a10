//! Polygon simplification algorithms
//!
//! This crate reduces the vertex count of closed outline polygons while
//! keeping their shape:
//! - Greedy notch collapse bounded by a vertex budget

pub mod decimate;

pub use decimate::*;

use spritemesh_core::{Polygon, Result};

/// Simplify a closed polygon
pub trait PolygonSimplifier {
    /// Return a simplified copy of `polygon`
    fn simplify(&self, polygon: &Polygon) -> Result<Polygon>;
}
