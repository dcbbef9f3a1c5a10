//! Convex hull by gift wrapping
//!
//! Starting from the lowest-leftmost candidate, each step sweeps the remaining
//! points for the one that no other point lies to the right of. Points lying
//! exactly on the chosen edge are kept on the hull in distance order, so the
//! result keeps collinear outline corners.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use spritemesh_core::{Point2d, PointSet, Polygon, POINT_EPSILON};

/// How the first tentative point of each wrapping step is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TentativePick {
    /// Always start from the first remaining point
    #[default]
    First,
    /// Start from a point drawn by a seeded generator
    Random { seed: u64 },
}

/// Configuration for hull construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullParams {
    /// Collinearity tolerance on the sine of the turn angle
    pub epsilon: f64,
    /// Initial tentative selection; never changes the resulting hull
    pub tentative: TentativePick,
}

impl Default for HullParams {
    fn default() -> Self {
        Self {
            epsilon: 1e-5,
            tentative: TentativePick::First,
        }
    }
}

impl HullParams {
    /// Set the collinearity tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Draw tentative points from a seeded generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.tentative = TentativePick::Random { seed };
        self
    }
}

/// Which side of the directed line `origin -> a` the point `b` is on.
///
/// Returns the sine of the angle between the two rays, so the result does not
/// depend on the scale of the input. Zero-length rays yield `0.0`.
fn orientation(origin: &Point2d, a: &Point2d, b: &Point2d) -> f64 {
    let u = a - origin;
    let v = b - origin;
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (u.x * v.y - u.y * v.x) / denom
}

/// First and last of lexicographically sorted points, if all of them lie on
/// the line through those two
fn collinear_extremes(sorted: &[Point2d], epsilon: f64) -> Option<[Point2d; 2]> {
    let (&first, &last) = (sorted.first()?, sorted.last()?);
    sorted
        .iter()
        .all(|p| orientation(&first, &last, p).abs() <= epsilon)
        .then_some([first, last])
}

/// Compute the convex hull of the candidate points.
///
/// Consumes the set. The hull is counter-clockwise, starts at the point with
/// the smallest x (ties broken by smallest y) and contains no duplicates.
/// Fewer than three distinct inputs yield a degenerate polygon holding them;
/// inputs lying on one line yield their two extreme points.
pub fn convex_hull(candidates: PointSet, params: &HullParams) -> Polygon {
    let mut remaining = candidates.into_deduplicated(POINT_EPSILON);
    if remaining.len() < 3 {
        tracing::debug!(points = remaining.len(), "Degenerate hull input");
        return Polygon::from_points(remaining);
    }
    if let Some(ends) = collinear_extremes(&remaining, params.epsilon) {
        tracing::debug!(points = remaining.len(), "Collinear hull input");
        return Polygon::from_points(ends.to_vec());
    }

    // Lexicographic order puts the seed first
    let start = remaining.swap_remove(0);
    let mut hull = vec![start];
    let mut current = start;
    let mut rng = match params.tentative {
        TentativePick::First => None,
        TentativePick::Random { seed } => Some(StdRng::seed_from_u64(seed)),
    };

    let max_steps = remaining.len() + 1;
    let mut closed = false;

    for _ in 0..max_steps {
        // `None` stands for the seed, which stays a valid target once the
        // hull has left it.
        let mut tentative: Option<usize> = if hull.len() > 1 || remaining.is_empty() {
            None
        } else {
            Some(match rng.as_mut() {
                Some(rng) => rng.gen_range(0..remaining.len()),
                None => 0,
            })
        };
        let mut collinear: Vec<usize> = Vec::new();

        for (i, candidate) in remaining.iter().enumerate() {
            if tentative == Some(i) {
                continue;
            }
            let target = tentative.map_or(start, |t| remaining[t]);
            let turn = orientation(&current, &target, candidate);

            if turn < -params.epsilon {
                tentative = Some(i);
                collinear.clear();
            } else if turn <= params.epsilon {
                // Only points ahead of the current vertex lie on the edge
                if (target - current).dot(&(candidate - current)) > 0.0 {
                    collinear.push(i);
                }
            }
        }

        let mut step: Vec<Option<usize>> = collinear.into_iter().map(Some).collect();
        step.push(tentative);
        step.sort_by(|a, b| {
            let pa = a.map_or(start, |i| remaining[i]);
            let pb = b.map_or(start, |i| remaining[i]);
            nalgebra::distance_squared(&current, &pa)
                .total_cmp(&nalgebra::distance_squared(&current, &pb))
        });

        let mut consumed = Vec::with_capacity(step.len());
        for entry in step {
            match entry {
                Some(i) => {
                    hull.push(remaining[i]);
                    consumed.push(i);
                }
                None => {
                    closed = true;
                    break;
                }
            }
        }

        if let Some(&last) = hull.last() {
            current = last;
        }

        // Highest index first so swap_remove never moves a pending index
        consumed.sort_unstable_by(|a, b| b.cmp(a));
        for i in consumed {
            remaining.swap_remove(i);
        }

        if closed {
            break;
        }
    }

    if !closed {
        tracing::warn!(
            vertices = hull.len(),
            "Hull construction stopped before returning to its start"
        );
    }

    tracing::debug!(vertices = hull.len(), "Built convex hull");
    Polygon::from_points(hull)
}
