//! Closed polygon used between hull construction and triangulation

use crate::point::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered, implicitly closed sequence of points.
///
/// The last point connects back to the first. Polygons built by the hull
/// stage are counter-clockwise (positive signed area) and carry no
/// consecutive duplicates. Storage is a contiguous vector addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point2d>,
}

impl Polygon {
    /// Create a new empty polygon
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polygon from an ordered list of points
    pub fn from_points(points: Vec<Point2d>) -> Self {
        Self { points }
    }

    /// Get the number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A polygon needs at least three vertices to enclose any area
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Vertex at a cyclic index
    #[inline]
    pub fn cyclic(&self, index: usize) -> &Point2d {
        &self.points[index % self.points.len()]
    }

    /// Iterate over the closed edge list `(p[i], p[i + 1])`
    pub fn edges(&self) -> impl Iterator<Item = (&Point2d, &Point2d)> + '_ {
        self.points.iter().circular_tuple_windows()
    }

    /// Signed area via the shoelace formula; positive for counter-clockwise
    pub fn signed_area(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            * 0.5
    }

    /// Unsigned enclosed area
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Total length of the closed outline
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.edges().map(|(a, b)| nalgebra::distance(a, b)).sum()
    }

    /// Whether the polygon winds counter-clockwise
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Whether every vertex turns the same way (collinear vertices allowed)
    pub fn is_convex(&self, epsilon: f64) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let sign = if self.is_counter_clockwise() { 1.0 } else { -1.0 };
        self.points
            .iter()
            .circular_tuple_windows()
            .all(|(a, b, c)| sign * cross(a, b, c) >= -epsilon)
    }

    /// Whether any two consecutive vertices coincide within `epsilon`
    pub fn has_consecutive_duplicates(&self, epsilon: f64) -> bool {
        self.points.len() >= 2 && self.edges().any(|(a, b)| approx_eq(a, b, epsilon))
    }

    /// Point-in-polygon test that also accepts points on an edge.
    ///
    /// Uses even-odd ray casting, with an explicit distance-to-edge check so
    /// boundary points within `tolerance` count as contained.
    pub fn contains(&self, point: &Point2d, tolerance: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        if self
            .edges()
            .any(|(a, b)| distance_to_segment(point, a, b) <= tolerance)
        {
            return true;
        }
        if self.is_degenerate() {
            return false;
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let t = (point.y - a.y) / (b.y - a.y);
                let x = a.x + t * (b.x - a.x);
                if point.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Shortest distance from `p` to the segment `a-b`
pub fn distance_to_segment(p: &Point2d, a: &Point2d, b: &Point2d) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return nalgebra::distance(p, a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    nalgebra::distance(p, &(a + ab * t))
}

impl Index<usize> for Polygon {
    type Output = Point2d;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl FromIterator<Point2d> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point2d>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}
