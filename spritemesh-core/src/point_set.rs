//! Candidate point set produced by corner extraction

use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An unordered collection of candidate outline points.
///
/// May contain duplicate coordinates; the hull builder tolerates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    pub points: Vec<Point2d>,
}

impl PointSet {
    /// Create a new empty point set
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a new point set with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point set from a vector of points
    pub fn from_points(points: Vec<Point2d>) -> Self {
        Self { points }
    }

    /// Get the number of points in the set
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point set is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the set
    pub fn push(&mut self, point: Point2d) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, Point2d> {
        self.points.iter()
    }

    /// Whether any point lies within `epsilon` of `point`
    pub fn contains_approx(&self, point: &Point2d, epsilon: f64) -> bool {
        self.points.iter().any(|p| approx_eq(p, point, epsilon))
    }

    /// Consume the set, returning the points with approximate duplicates
    /// removed. Order of the survivors is lexicographic (x, then y).
    pub fn into_deduplicated(self, epsilon: f64) -> Vec<Point2d> {
        let mut points = self.points;
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        let mut unique: Vec<Point2d> = Vec::with_capacity(points.len());
        for p in points {
            // Near-equal points are not always adjacent after a lexicographic
            // sort, so compare against the tail that shares the same x band.
            let duplicate = unique
                .iter()
                .rev()
                .take_while(|q| p.x - q.x <= epsilon)
                .any(|q| approx_eq(q, &p, epsilon));
            if !duplicate {
                unique.push(p);
            }
        }
        unique
    }
}

impl Index<usize> for PointSet {
    type Output = Point2d;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IntoIterator for PointSet {
    type Item = Point2d;
    type IntoIter = std::vec::IntoIter<Point2d>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point2d;
    type IntoIter = std::slice::Iter<'a, Point2d>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Extend<Point2d> for PointSet {
    fn extend<I: IntoIterator<Item = Point2d>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl FromIterator<Point2d> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point2d>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}
