//! # Spritemesh Algorithms
//!
//! Outline algorithms that turn a visibility grid into a closed polygon.
//!
//! This crate provides boundary corner extraction over a [`VisibilityGrid`]
//! and a gift-wrapping convex hull over the extracted candidate points.
//!
//! [`VisibilityGrid`]: spritemesh_core::VisibilityGrid

pub mod corners;
pub mod hull;

// Re-export commonly used items
pub use corners::*;
pub use hull::*;
