//! Core data structures and traits for spritemesh
//!
//! This crate provides the fundamental types shared by every stage of the
//! sprite mesh pipeline: 2D points, visibility grids, candidate point sets,
//! polygons, output meshes and the texture source abstraction.

pub mod point;
pub mod point_set;
pub mod polygon;
pub mod mesh;
pub mod grid;
pub mod traits;
pub mod error;

#[cfg(feature = "image")]
pub mod image_source;

pub use point::*;
pub use point_set::*;
pub use polygon::*;
pub use mesh::*;
pub use grid::*;
pub use traits::*;
pub use error::*;

#[cfg(feature = "image")]
pub use image_source::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Vector2};

// Type aliases for easier imports
pub type Point = Point2d;
pub type Mesh = SpriteMesh;
