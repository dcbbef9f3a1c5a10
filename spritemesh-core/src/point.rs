//! Point types and related functionality

use nalgebra::{Point2, Vector2};

/// A 2D point with double precision coordinates
pub type Point2d = Point2<f64>;

/// A 2D vector with double precision components
pub type Vector2d = Vector2<f64>;

/// Default tolerance for approximate point equality
pub const POINT_EPSILON: f64 = 1e-9;

/// Z component of the cross product of `(a - origin)` and `(b - origin)`.
///
/// Positive when `b` lies to the left of the ray `origin -> a`.
#[inline]
pub fn cross(origin: &Point2d, a: &Point2d, b: &Point2d) -> f64 {
    let u = a - origin;
    let v = b - origin;
    u.x * v.y - u.y * v.x
}

/// Approximate point equality with an absolute per-axis tolerance
#[inline]
pub fn approx_eq(a: &Point2d, b: &Point2d, epsilon: f64) -> bool {
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon
}

/// Area of a triangle from its three side lengths (Heron's formula).
///
/// The radicand is clamped at zero so slivers never produce NaN.
pub fn heron_area(a: &Point2d, b: &Point2d, c: &Point2d) -> f64 {
    let ab = nalgebra::distance(a, b);
    let bc = nalgebra::distance(b, c);
    let ca = nalgebra::distance(c, a);
    let s = (ab + bc + ca) * 0.5;
    let radicand = s * (s - ab) * (s - bc) * (s - ca);
    radicand.max(0.0).sqrt()
}
