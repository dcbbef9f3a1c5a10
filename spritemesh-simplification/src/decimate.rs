//! Greedy notch-collapse decimation
//!
//! Each iteration looks at every run of four consecutive vertices `A, B, C, D`
//! and intersects the infinite lines `AB` and `CD` at `X`. Replacing `B` and
//! `C` with `X` removes one vertex and adds the triangle `B, C, X` to the
//! outline. The run with the smallest such triangle is collapsed, until the
//! polygon fits the vertex budget or no run can be collapsed.

use crate::PolygonSimplifier;
use serde::{Deserialize, Serialize};
use spritemesh_core::{approx_eq, heron_area, Error, Point2d, Polygon, Result, POINT_EPSILON};
use std::fmt;

/// Default vertex budget for decimated outlines
pub const DEFAULT_MAX_VERTICES: usize = 100;

/// Parameters for polygon decimation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecimateParams {
    /// Upper bound on the output vertex count; must be at least 3
    pub max_vertices: usize,
    /// Lines whose directions differ by a sine below this are parallel
    pub parallel_epsilon: f64,
    /// Optional cap on collapses performed in one call
    pub max_iterations: Option<usize>,
}

impl Default for DecimateParams {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_MAX_VERTICES,
            parallel_epsilon: 1e-9,
            max_iterations: None,
        }
    }
}

impl DecimateParams {
    /// Create params targeting a specific vertex budget
    pub fn with_max_vertices(max_vertices: usize) -> Self {
        Self {
            max_vertices,
            ..Default::default()
        }
    }

    /// Cap the number of collapses
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Check that the parameters describe a reachable target
    pub fn validate(&self) -> Result<()> {
        if self.max_vertices < 3 {
            return Err(Error::InvalidInput(format!(
                "max_vertices must be at least 3, got {}",
                self.max_vertices
            )));
        }
        if self.parallel_epsilon.is_nan() || self.parallel_epsilon < 0.0 {
            return Err(Error::InvalidInput(format!(
                "parallel_epsilon must be non-negative, got {}",
                self.parallel_epsilon
            )));
        }
        Ok(())
    }
}

/// Result of polygon decimation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecimationResult {
    /// The decimated polygon
    pub polygon: Polygon,
    /// Vertex count before decimation
    pub original_vertices: usize,
    /// Vertex count after decimation
    pub final_vertices: usize,
    /// Number of collapses performed
    pub collapses: usize,
    /// Sum of the notch areas added by all collapses
    pub added_area: f64,
    /// False when decimation stopped above the vertex budget
    pub converged: bool,
}

impl DecimationResult {
    /// Get the reduction ratio (final / original)
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_vertices == 0 {
            1.0
        } else {
            self.final_vertices as f64 / self.original_vertices as f64
        }
    }

    /// Check if any collapse occurred
    pub fn was_decimated(&self) -> bool {
        self.collapses > 0
    }
}

impl fmt::Display for DecimationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decimation: {} → {} vertices ({} collapses{})",
            self.original_vertices,
            self.final_vertices,
            self.collapses,
            if self.converged { "" } else { ", stalled" }
        )
    }
}

/// The cheapest collapse found in one sweep
#[derive(Debug, Clone, Copy)]
struct Collapse {
    /// Index of `B`; `C` is the next vertex cyclically
    index: usize,
    point: Point2d,
    area: f64,
}

/// Intersection of the infinite lines through `a, b` and `c, d`.
///
/// Solves `a1 x + b1 y = c1`, `a2 x + b2 y = c2`. Returns `None` when the
/// determinant is negligible relative to the edge lengths.
fn line_intersection(
    a: &Point2d,
    b: &Point2d,
    c: &Point2d,
    d: &Point2d,
    epsilon: f64,
) -> Option<Point2d> {
    let a1 = b.y - a.y;
    let b1 = a.x - b.x;
    let c1 = a1 * a.x + b1 * a.y;

    let a2 = d.y - c.y;
    let b2 = c.x - d.x;
    let c2 = a2 * c.x + b2 * c.y;

    let det = a1 * b2 - a2 * b1;
    let scale = nalgebra::distance(a, b) * nalgebra::distance(c, d);
    if det.abs() <= epsilon * scale || scale == 0.0 {
        return None;
    }

    let x = (b2 * c1 - b1 * c2) / det;
    let y = (a1 * c2 - a2 * c1) / det;
    Some(Point2d::new(x, y))
}

/// Whether `x` lies on or beyond `to` when travelling from `from`
fn is_ahead(from: &Point2d, to: &Point2d, x: &Point2d) -> bool {
    let step = x - to;
    step.norm() <= POINT_EPSILON || step.dot(&(to - from)) >= 0.0
}

fn cheapest_collapse(points: &[Point2d], epsilon: f64) -> Option<Collapse> {
    let n = points.len();
    let mut best: Option<Collapse> = None;

    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let c = &points[(i + 2) % n];
        let d = &points[(i + 3) % n];

        let Some(x) = line_intersection(a, b, c, d, epsilon) else {
            continue;
        };
        // The new vertex must extend both edges outward, otherwise the
        // outline would fold over itself.
        if !is_ahead(a, b, &x) || !is_ahead(d, c, &x) {
            continue;
        }
        if approx_eq(&x, a, POINT_EPSILON) || approx_eq(&x, d, POINT_EPSILON) {
            continue;
        }

        let area = heron_area(b, c, &x);
        if best.map_or(true, |best| area < best.area) {
            best = Some(Collapse {
                index: (i + 1) % n,
                point: x,
                area,
            });
        }
    }

    best
}

/// Decimate `polygon` until it has at most `params.max_vertices` vertices.
///
/// One vertex is removed per iteration. If no window can be collapsed (all
/// candidate edge pairs parallel or folding), decimation stops early and the
/// result reports `converged = false`.
pub fn decimate(polygon: &Polygon, params: &DecimateParams) -> Result<DecimationResult> {
    params.validate()?;

    let original_vertices = polygon.len();
    let mut points = polygon.points.clone();
    let mut collapses = 0usize;
    let mut added_area = 0.0;
    let mut converged = true;
    let limit = params.max_iterations.unwrap_or(usize::MAX);

    while points.len() > params.max_vertices {
        if collapses >= limit {
            converged = false;
            tracing::warn!(
                vertices = points.len(),
                target = params.max_vertices,
                limit,
                "Decimation hit its iteration cap"
            );
            break;
        }

        let Some(collapse) = cheapest_collapse(&points, params.parallel_epsilon) else {
            converged = false;
            tracing::warn!(
                vertices = points.len(),
                target = params.max_vertices,
                "No collapsible vertex pair left, stopping above target"
            );
            break;
        };

        let b = collapse.index;
        let c = (b + 1) % points.len();
        points[b] = collapse.point;
        points.remove(c);

        added_area += collapse.area;
        collapses += 1;
    }

    tracing::debug!(
        original = original_vertices,
        remaining = points.len(),
        collapses,
        "Decimated polygon"
    );

    Ok(DecimationResult {
        final_vertices: points.len(),
        polygon: Polygon::from_points(points),
        original_vertices,
        collapses,
        added_area,
        converged,
    })
}

/// Polygon simplifier backed by [`decimate`]
#[derive(Debug, Clone, Default)]
pub struct PolygonDecimator {
    pub params: DecimateParams,
}

impl PolygonDecimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: DecimateParams) -> Self {
        Self { params }
    }
}

impl PolygonSimplifier for PolygonDecimator {
    fn simplify(&self, polygon: &Polygon) -> Result<Polygon> {
        Ok(decimate(polygon, &self.params)?.polygon)
    }
}
