//! Boundary corner extraction
//!
//! Every visible texel is checked against its eight neighbours. A texel corner
//! is exposed when the three neighbours sharing that corner are all hidden;
//! each exposed corner becomes one candidate outline point, normalized to
//! `[0, 1]` texture space.

use spritemesh_core::{Point2d, PointSet, VisibilityGrid};

/// Visibility of the eight neighbours around a texel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Neighbourhood {
    right: bool,
    top_right: bool,
    top: bool,
    top_left: bool,
    left: bool,
    bottom_left: bool,
    bottom: bool,
    bottom_right: bool,
}

impl Neighbourhood {
    fn around(grid: &VisibilityGrid, x: isize, y: isize) -> Self {
        Self {
            right: grid.is_visible(x + 1, y),
            top_right: grid.is_visible(x + 1, y + 1),
            top: grid.is_visible(x, y + 1),
            top_left: grid.is_visible(x - 1, y + 1),
            left: grid.is_visible(x - 1, y),
            bottom_left: grid.is_visible(x - 1, y - 1),
            bottom: grid.is_visible(x, y - 1),
            bottom_right: grid.is_visible(x + 1, y - 1),
        }
    }

    /// Exposed corners as texel-relative offsets
    fn exposed_corners(&self) -> impl Iterator<Item = (usize, usize)> {
        [
            (!self.right && !self.top_right && !self.top, (1, 1)),
            (!self.top && !self.top_left && !self.left, (0, 1)),
            (!self.left && !self.bottom_left && !self.bottom, (0, 0)),
            (!self.bottom && !self.bottom_right && !self.right, (1, 0)),
        ]
        .into_iter()
        .filter_map(|(exposed, offset)| exposed.then_some(offset))
    }
}

/// Extract candidate outline points from the exposed corners of visible texels.
///
/// Points are emitted at `((x + dx) / width, (y + dy) / height)`. Interior
/// texels contribute nothing; duplicates are possible where diagonal texels
/// touch.
pub fn extract_corners(grid: &VisibilityGrid) -> PointSet {
    let width = grid.width();
    let height = grid.height();
    let mut candidates = PointSet::new();

    for y in 0..height {
        for x in 0..width {
            if !grid.is_visible(x as isize, y as isize) {
                continue;
            }

            let neighbourhood = Neighbourhood::around(grid, x as isize, y as isize);
            candidates.extend(neighbourhood.exposed_corners().map(|(dx, dy)| {
                Point2d::new(
                    (x + dx) as f64 / width as f64,
                    (y + dy) as f64 / height as f64,
                )
            }));
        }
    }

    tracing::debug!(
        width,
        height,
        candidates = candidates.len(),
        "Extracted boundary corners"
    );
    candidates
}
