//! # spritemesh reconstruction
//!
//! Mesh construction for sprite outlines.
//!
//! This crate turns a decimated outline into triangles and chains every stage
//! of the sprite mesh pipeline, from texture sampling to the final mesh. Batch
//! helpers run independent sprites in parallel.

pub mod triangulate;
pub mod pipeline;
pub mod parallel;

// Re-export commonly used items
pub use triangulate::*;
pub use pipeline::*;
pub use parallel::*;
