//! Texture sources backed by decoded `image` buffers

use crate::traits::TextureSource;
use image::{GrayImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Colour channel used as the opacity signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
    #[default]
    Alpha,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

/// One channel of an RGBA image, sampled in UV orientation.
///
/// Image rows are stored top-down; row `0` of the image is returned as
/// `y = height - 1`.
#[derive(Debug, Clone, Copy)]
pub struct ChannelView<'a> {
    image: &'a RgbaImage,
    channel: Channel,
}

impl<'a> ChannelView<'a> {
    pub fn new(image: &'a RgbaImage, channel: Channel) -> Self {
        Self { image, channel }
    }

    /// View of the alpha channel
    pub fn alpha(image: &'a RgbaImage) -> Self {
        Self::new(image, Channel::Alpha)
    }
}

impl TextureSource for ChannelView<'_> {
    fn dimensions(&self) -> (usize, usize) {
        (self.image.width() as usize, self.image.height() as usize)
    }

    fn sample(&self, x: usize, y: usize) -> f32 {
        let row = self.image.height() - 1 - y as u32;
        let pixel = self.image.get_pixel(x as u32, row);
        pixel.0[self.channel.index()] as f32 / 255.0
    }
}

/// A single-channel image, sampled in UV orientation
#[derive(Debug, Clone, Copy)]
pub struct LumaView<'a> {
    image: &'a GrayImage,
}

impl<'a> LumaView<'a> {
    pub fn new(image: &'a GrayImage) -> Self {
        Self { image }
    }
}

impl TextureSource for LumaView<'_> {
    fn dimensions(&self) -> (usize, usize) {
        (self.image.width() as usize, self.image.height() as usize)
    }

    fn sample(&self, x: usize, y: usize) -> f32 {
        let row = self.image.height() - 1 - y as u32;
        self.image.get_pixel(x as u32, row).0[0] as f32 / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GridParams, VisibilityGrid};
    use image::{Luma, Rgba};

    #[test]
    fn test_alpha_channel_flips_rows() {
        // Only the top image row is opaque
        let mut image = RgbaImage::new(3, 2);
        for x in 0..3 {
            image.put_pixel(x, 0, Rgba([0, 0, 0, 255]));
        }

        let view = ChannelView::alpha(&image);
        assert_eq!(view.dimensions(), (3, 2));
        assert_eq!(view.sample(0, 1), 1.0);
        assert_eq!(view.sample(0, 0), 0.0);

        let grid = VisibilityGrid::from_source(&view, &GridParams::default()).unwrap();
        assert!(grid.is_visible(2, 1));
        assert!(!grid.is_visible(2, 0));
    }

    #[test]
    fn test_red_channel() {
        let mut image = RgbaImage::new(1, 1);
        image.put_pixel(0, 0, Rgba([51, 0, 0, 0]));
        let view = ChannelView::new(&image, Channel::Red);
        assert!((view.sample(0, 0) - 0.2).abs() < 1e-6);
        assert_eq!(ChannelView::alpha(&image).sample(0, 0), 0.0);
    }

    #[test]
    fn test_luma_view() {
        let mut image = GrayImage::new(2, 2);
        image.put_pixel(1, 1, Luma([255]));
        let view = LumaView::new(&image);
        // Bottom-right texel in UV orientation
        assert_eq!(view.sample(1, 0), 1.0);
        assert_eq!(view.sample(1, 1), 0.0);
    }
}
