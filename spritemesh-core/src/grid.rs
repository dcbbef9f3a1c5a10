//! Visibility grid built from a texture's opacity channel

use crate::{traits::TextureSource, Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters for classifying texels as visible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// A texel is visible when its channel value is strictly greater than this
    pub threshold: f32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self { threshold: 0.0 }
    }
}

impl GridParams {
    /// Create params with a custom visibility threshold
    pub fn with_threshold(threshold: f32) -> Self {
        Self { threshold }
    }
}

/// Immutable row-major grid of visibility flags.
///
/// Row `y = 0` is the bottom row, matching UV orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl VisibilityGrid {
    /// Build a grid from visibility flags
    pub fn from_bools(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        check_dimensions(width, height, cells.len())?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from per-texel scalars; visible iff `value > threshold`
    pub fn from_values<T>(width: usize, height: usize, values: &[T], threshold: f64) -> Result<Self>
    where
        T: Into<f64> + Copy,
    {
        check_dimensions(width, height, values.len())?;
        let cells = values.iter().map(|&v| v.into() > threshold).collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Read a texture source once and classify every texel
    pub fn from_source<S: TextureSource + ?Sized>(source: &S, params: &GridParams) -> Result<Self> {
        let (width, height) = source.dimensions();
        check_dimensions(width, height, width.saturating_mul(height))?;

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(source.sample(x, y) > params.threshold);
            }
        }

        let grid = Self {
            width,
            height,
            cells,
        };
        tracing::debug!(
            width,
            height,
            visible = grid.visible_count(),
            "Built visibility grid"
        );
        Ok(grid)
    }

    /// Grid width in texels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in texels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Visibility at signed coordinates; anything outside the grid is hidden
    #[inline]
    pub fn is_visible(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Number of visible texels
    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// True when no texel is visible
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Row-major visibility flags
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

fn check_dimensions(width: usize, height: usize, len: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "Grid dimensions must be positive, got {width}x{height}"
        )));
    }
    if width.checked_mul(height) != Some(len) {
        return Err(Error::InvalidInput(format!(
            "Expected {} values for a {width}x{height} grid, got {len}",
            width.saturating_mul(height)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Checker {
        size: usize,
    }

    impl TextureSource for Checker {
        fn dimensions(&self) -> (usize, usize) {
            (self.size, self.size)
        }

        fn sample(&self, x: usize, y: usize) -> f32 {
            if (x + y) % 2 == 0 { 1.0 } else { 0.0 }
        }
    }

    #[test]
    fn test_from_values_threshold() {
        let grid = VisibilityGrid::from_values(2, 2, &[0.0f32, 0.25, 1.0, 0.0], 0.0).unwrap();
        assert!(!grid.is_visible(0, 0));
        assert!(grid.is_visible(1, 0));
        assert!(grid.is_visible(0, 1));
        assert!(!grid.is_visible(1, 1));
        assert_eq!(grid.visible_count(), 2);
    }

    #[test]
    fn test_from_values_integer_channel() {
        let grid = VisibilityGrid::from_values(3, 1, &[0u8, 128, 255], 127.0).unwrap();
        assert_eq!(grid.cells(), &[false, true, true]);
    }

    #[test]
    fn test_out_of_bounds_is_hidden() {
        let grid = VisibilityGrid::from_bools(1, 1, vec![true]).unwrap();
        assert!(grid.is_visible(0, 0));
        assert!(!grid.is_visible(-1, 0));
        assert!(!grid.is_visible(0, -1));
        assert!(!grid.is_visible(1, 0));
        assert!(!grid.is_visible(0, 1));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(VisibilityGrid::from_bools(0, 3, vec![]).is_err());
        assert!(VisibilityGrid::from_bools(2, 2, vec![true; 3]).is_err());
        assert!(VisibilityGrid::from_values(2, 0, &[1.0f32], 0.0).is_err());
    }

    #[test]
    fn test_from_source() {
        let grid =
            VisibilityGrid::from_source(&Checker { size: 4 }, &GridParams::default()).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.visible_count(), 8);
        assert!(grid.is_visible(0, 0));
        assert!(!grid.is_visible(1, 0));
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_from_source_threshold() {
        let params = GridParams::with_threshold(1.0);
        let grid = VisibilityGrid::from_source(&Checker { size: 2 }, &params).unwrap();
        assert!(grid.is_empty());
    }
}
