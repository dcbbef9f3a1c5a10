//! End-to-end sprite mesh pipeline
//!
//! Runs the stages in order: visibility grid, boundary corners, convex hull,
//! decimation and triangulation. Each stage owns its intermediate data; the
//! pipeline itself holds only configuration and can be shared across threads.

use crate::triangulate::{triangles_to_mesh, triangulate, TriangulationParams};
use serde::{Deserialize, Serialize};
use spritemesh_algorithms::{convex_hull, extract_corners, HullParams};
use spritemesh_core::{
    Error, GridParams, PointSet, Result, SpriteMesh, TextureSource, VisibilityGrid,
    POINT_EPSILON,
};
use spritemesh_simplification::{decimate, DecimateParams};
use std::fmt;

/// Configuration for every pipeline stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub grid: GridParams,
    pub hull: HullParams,
    pub decimate: DecimateParams,
    pub triangulation: TriangulationParams,
}

impl PipelineConfig {
    /// Default configuration with a custom vertex budget
    pub fn with_max_vertices(max_vertices: usize) -> Self {
        Self {
            decimate: DecimateParams::with_max_vertices(max_vertices),
            ..Default::default()
        }
    }

    /// Set the visibility threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.grid = GridParams::with_threshold(threshold);
        self
    }

    /// Check the configuration before any stage runs
    pub fn validate(&self) -> Result<()> {
        self.decimate.validate()?;
        if self.hull.epsilon.is_nan() || self.hull.epsilon < 0.0 {
            return Err(Error::InvalidInput(format!(
                "Hull epsilon must be non-negative, got {}",
                self.hull.epsilon
            )));
        }
        Ok(())
    }
}

/// Non-fatal conditions reported alongside a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineWarning {
    /// The hull had fewer than three points; the mesh is empty
    DegenerateHull { vertices: usize },
    /// Decimation could not reach its vertex budget
    DecimationStalled { vertices: usize, target: usize },
    /// Triangulation stopped with vertices left unclipped
    TriangulationIncomplete { triangles: usize, expected: usize },
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::DegenerateHull { vertices } => {
                write!(f, "degenerate hull with {vertices} vertices")
            }
            PipelineWarning::DecimationStalled { vertices, target } => {
                write!(f, "decimation stalled at {vertices} vertices (target {target})")
            }
            PipelineWarning::TriangulationIncomplete {
                triangles,
                expected,
            } => write!(f, "triangulation produced {triangles} of {expected} triangles"),
        }
    }
}

/// Per-stage statistics of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Vertices left after decimation
    pub decimated_vertices: usize,
    /// Collapses performed by the decimator
    pub collapses: usize,
    /// Area added to the hull by decimation
    pub added_area: f64,
    /// Triangles in the final mesh
    pub triangles: usize,
    /// Triples examined by the triangulator
    pub triangulation_iterations: usize,
}

/// Output of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub mesh: SpriteMesh,
    /// Vertex count of the convex hull before decimation
    pub hull_vertices: usize,
    /// Corner candidates extracted from the grid
    pub candidate_points: usize,
    pub stats: PipelineStats,
    pub warnings: Vec<PipelineWarning>,
}

impl PipelineResult {
    /// True when every stage converged
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl fmt::Display for PipelineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} candidates → {} hull vertices → {} vertices, {} triangles",
            self.candidate_points,
            self.hull_vertices,
            self.mesh.vertex_count(),
            self.mesh.triangle_count()
        )?;
        for warning in &self.warnings {
            write!(f, "; {warning}")?;
        }
        Ok(())
    }
}

/// Sprite mesh generator
#[derive(Debug, Clone, Default)]
pub struct MeshPipeline {
    config: PipelineConfig,
}

impl MeshPipeline {
    /// Create a pipeline with configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Create a pipeline with default stages and a custom vertex budget
    pub fn with_max_vertices(max_vertices: usize) -> Self {
        Self::new(PipelineConfig::with_max_vertices(max_vertices))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Sample a texture source and build its mesh
    pub fn build_from_source<S: TextureSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<PipelineResult> {
        self.config.validate()?;
        let grid = VisibilityGrid::from_source(source, &self.config.grid)?;
        self.build_from_grid(&grid)
    }

    /// Build a mesh from a precomputed visibility grid
    pub fn build_from_grid(&self, grid: &VisibilityGrid) -> Result<PipelineResult> {
        self.config.validate()?;
        let candidates = extract_corners(grid);
        if candidates.is_empty() {
            return Err(Error::InvalidInput(format!(
                "No visible texels in {}x{} grid",
                grid.width(),
                grid.height()
            )));
        }
        self.run(candidates)
    }

    /// Build a mesh from candidate outline points in `[0, 1]` texture space
    pub fn build_from_candidates(&self, candidates: PointSet) -> Result<PipelineResult> {
        self.config.validate()?;
        if candidates.is_empty() {
            return Err(Error::InvalidInput(
                "No candidate points to build a mesh from".to_string(),
            ));
        }
        self.run(candidates)
    }

    fn run(&self, candidates: PointSet) -> Result<PipelineResult> {
        let candidate_points = candidates.len();
        tracing::debug!(candidates = candidate_points, "Building sprite mesh");

        let hull = convex_hull(candidates, &self.config.hull);
        let hull_vertices = hull.len();
        let mut warnings = Vec::new();

        // Collinear candidates enclose nothing
        if hull.is_degenerate() || hull.area() <= POINT_EPSILON {
            tracing::warn!(
                vertices = hull_vertices,
                area = hull.area(),
                "Degenerate hull, emitting an empty mesh"
            );
            warnings.push(PipelineWarning::DegenerateHull {
                vertices: hull_vertices,
            });
            return Ok(PipelineResult {
                mesh: SpriteMesh::new(),
                hull_vertices,
                candidate_points,
                stats: PipelineStats::default(),
                warnings,
            });
        }

        let decimation = decimate(&hull, &self.config.decimate)?;
        if !decimation.converged {
            warnings.push(PipelineWarning::DecimationStalled {
                vertices: decimation.final_vertices,
                target: self.config.decimate.max_vertices,
            });
        }
        let polygon = decimation.polygon;

        let triangulation = triangulate(&polygon, &self.config.triangulation)?;
        if !triangulation.converged {
            warnings.push(PipelineWarning::TriangulationIncomplete {
                triangles: triangulation.len(),
                expected: polygon.len() - 2,
            });
        }

        let stats = PipelineStats {
            decimated_vertices: polygon.len(),
            collapses: decimation.collapses,
            added_area: decimation.added_area,
            triangles: triangulation.len(),
            triangulation_iterations: triangulation.iterations,
        };
        let mesh = triangles_to_mesh(&polygon, triangulation.triangles);

        tracing::info!(
            candidates = candidate_points,
            hull = hull_vertices,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            warnings = warnings.len(),
            "Generated sprite mesh"
        );

        Ok(PipelineResult {
            mesh,
            hull_vertices,
            candidate_points,
            stats,
            warnings,
        })
    }
}

/// Generate a sprite mesh from a visibility grid with default stage settings
pub fn generate_sprite_mesh(grid: &VisibilityGrid, max_vertices: usize) -> Result<SpriteMesh> {
    MeshPipeline::with_max_vertices(max_vertices)
        .build_from_grid(grid)
        .map(|result| result.mesh)
}
