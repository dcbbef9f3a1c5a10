//! # spritemesh
//!
//! Tight convex meshes for 2D sprites, built from texture transparency.
//!
//! This is the umbrella crate that provides convenient access to all spritemesh
//! functionality. You can use this crate to get everything in one place, or use
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Points, visibility grids, polygons, meshes and texture sources
//! - **Algorithms**: Boundary corner extraction and convex hulls
//! - **Simplification**: Greedy polygon decimation to a vertex budget
//! - **Reconstruction**: Triangulation, the full pipeline and batch generation
//!
//! ## Quick Start
//!
//! ```rust
//! use spritemesh::prelude::*;
//!
//! // A 4x4 fully opaque sprite
//! let grid = VisibilityGrid::from_bools(4, 4, vec![true; 16])?;
//!
//! let result = MeshPipeline::with_max_vertices(8).build_from_grid(&grid)?;
//! assert_eq!(result.mesh.triangle_count(), 2);
//! # Ok::<(), spritemesh::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables everything below
//! - `algorithms`: Corner extraction and hull construction
//! - `simplification`: Polygon decimation
//! - `reconstruction`: Triangulation and the pipeline (pulls in the two above)
//! - `image`: Texture sources over `image` buffers
//! - `all`: Enables all features

// Re-export core functionality
pub use spritemesh_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use spritemesh_algorithms as algorithms;

#[cfg(feature = "simplification")]
pub use spritemesh_simplification as simplification;

#[cfg(feature = "reconstruction")]
pub use spritemesh_reconstruction as reconstruction;

/// Convenient imports for common use cases
pub mod prelude {
    pub use spritemesh_core::*;

    #[cfg(feature = "algorithms")]
    pub use spritemesh_algorithms::*;

    #[cfg(feature = "simplification")]
    pub use spritemesh_simplification::*;

    #[cfg(feature = "reconstruction")]
    pub use spritemesh_reconstruction::*;
}
