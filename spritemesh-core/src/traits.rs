//! Core traits for spritemesh

use crate::{mesh::SpriteMesh, point::*, point_set::PointSet, polygon::Polygon};

/// A texture-like source of per-texel scalar values.
///
/// Coordinates follow UV orientation: `y = 0` is the bottom row.
pub trait TextureSource {
    /// Width and height in texels
    fn dimensions(&self) -> (usize, usize);

    /// Scalar channel value in `[0, 1]` at `(x, y)`
    fn sample(&self, x: usize, y: usize) -> f32;
}

impl<T: TextureSource + ?Sized> TextureSource for &T {
    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn sample(&self, x: usize, y: usize) -> f32 {
        (**self).sample(x, y)
    }
}

/// Trait for objects occupying a region of the plane
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point2d, Point2d);

    /// Get the center point of the object
    fn center(&self) -> Point2d {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

fn bounds_of<'a>(points: impl IntoIterator<Item = &'a Point2d>) -> (Point2d, Point2d) {
    let mut points = points.into_iter();
    let Some(first) = points.next() else {
        return (Point2d::origin(), Point2d::origin());
    };

    let mut min = *first;
    let mut max = *first;
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

impl Drawable for PointSet {
    fn bounding_box(&self) -> (Point2d, Point2d) {
        bounds_of(&self.points)
    }
}

impl Drawable for Polygon {
    fn bounding_box(&self) -> (Point2d, Point2d) {
        bounds_of(&self.points)
    }
}

impl Drawable for SpriteMesh {
    fn bounding_box(&self) -> (Point2d, Point2d) {
        bounds_of(&self.vertices)
    }
}
