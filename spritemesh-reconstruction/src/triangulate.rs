//! Ear clipping with an empty-circumcircle test
//!
//! Ears are taken from an active cyclic vertex list. An ear is accepted only
//! when it turns left and no other active vertex lies strictly inside its
//! circumcircle, which keeps slivers out of convex outlines.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use spritemesh_core::{cross, Error, Point2d, Polygon, Result, SpriteMesh};

/// Parameters for polygon triangulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangulationParams {
    /// Tolerance for both the turn test and the in-circle test
    pub epsilon: f64,
    /// Cap on examined triples; `None` means `n * n + n`
    pub max_iterations: Option<usize>,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            max_iterations: None,
        }
    }
}

impl TriangulationParams {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}

/// Triangles produced by [`triangulate`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    /// Polygon vertex indices, clockwise
    pub triangles: Vec<[usize; 3]>,
    /// False when clipping stopped with three or more vertices left
    pub converged: bool,
    /// Number of triples examined
    pub iterations: usize,
}

impl Triangulation {
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// In-circle determinant of `d` against the counter-clockwise triangle `a, b, c`.
///
/// Positive when `d` lies strictly inside the circumcircle.
fn in_circle(a: &Point2d, b: &Point2d, c: &Point2d, d: &Point2d) -> f64 {
    let row = |p: &Point2d| {
        let dx = p.x - d.x;
        let dy = p.y - d.y;
        [dx, dy, dx * dx + dy * dy]
    };
    let (ra, rb, rc) = (row(a), row(b), row(c));
    Matrix3::new(
        ra[0], ra[1], ra[2], //
        rb[0], rb[1], rb[2], //
        rc[0], rc[1], rc[2],
    )
    .determinant()
}

fn is_valid_ear(points: &[Point2d], active: &[usize], cursor: usize, epsilon: f64) -> bool {
    let len = active.len();
    let i0 = active[cursor];
    let i1 = active[(cursor + 1) % len];
    let i2 = active[(cursor + 2) % len];
    let (v0, v1, v2) = (&points[i0], &points[i1], &points[i2]);

    if cross(v0, v1, v2) <= epsilon {
        return false;
    }

    active
        .iter()
        .filter(|&&i| i != i0 && i != i1 && i != i2)
        .all(|&i| in_circle(v0, v1, v2, &points[i]) <= epsilon)
}

/// Triangulate a counter-clockwise polygon.
///
/// Emits `n - 2` triangles for convex input. Fails only when the polygon has
/// fewer than three points; a stalled clip is reported through
/// [`Triangulation::converged`] with the triangles found so far.
pub fn triangulate(polygon: &Polygon, params: &TriangulationParams) -> Result<Triangulation> {
    let n = polygon.len();
    if n < 3 {
        return Err(Error::DegenerateGeometry(format!(
            "Cannot triangulate a polygon with {n} points"
        )));
    }

    let points = &polygon.points;
    let max_iterations = params.max_iterations.unwrap_or(n * n + n);
    let mut active: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    let mut cursor = 0;
    let mut iterations = 0;
    // Triples rejected since the last emitted ear
    let mut misses = 0;

    while active.len() >= 3 {
        if iterations >= max_iterations || misses >= active.len() {
            tracing::warn!(
                remaining = active.len(),
                triangles = triangles.len(),
                iterations,
                "Triangulation stopped before clipping every ear"
            );
            return Ok(Triangulation {
                triangles,
                converged: false,
                iterations,
            });
        }
        iterations += 1;

        if is_valid_ear(points, &active, cursor, params.epsilon) {
            let len = active.len();
            let v0 = active[cursor];
            let v1 = active[(cursor + 1) % len];
            let v2 = active[(cursor + 2) % len];
            triangles.push([v2, v1, v0]);

            active.remove((cursor + 1) % len);
            if !active.is_empty() {
                cursor %= active.len();
            }
            misses = 0;
        } else {
            cursor = (cursor + 1) % active.len();
            misses += 1;
        }
    }

    tracing::debug!(
        vertices = n,
        triangles = triangles.len(),
        iterations,
        "Triangulated polygon"
    );

    Ok(Triangulation {
        triangles,
        converged: true,
        iterations,
    })
}

/// Build a centred sprite mesh from a polygon and its triangles
pub fn triangles_to_mesh(polygon: &Polygon, triangles: Vec<[usize; 3]>) -> SpriteMesh {
    SpriteMesh::from_polygon(polygon, triangles)
}
