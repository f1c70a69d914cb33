//! Stride-based pixel sampling.

use image::RgbImage;
use plantcare_core::{ImageDimensions, PixelColor};

/// A sub-sampled view of a raster.
///
/// Yields the pixels at grid points where both coordinates are multiples of
/// the stride, in row-major order. The grid is a pure view: iterating it has
/// no side effects and [`SampleGrid::pixels`] can be called any number of
/// times. An empty raster yields an empty sequence rather than an error.
#[derive(Debug, Clone, Copy)]
pub struct SampleGrid<'a> {
    image: &'a RgbImage,
    stride: u32,
}

impl<'a> SampleGrid<'a> {
    /// Creates a grid over `image` with the given stride (clamped to >= 1)
    pub fn new(image: &'a RgbImage, stride: u32) -> Self {
        Self {
            image,
            stride: stride.max(1),
        }
    }

    /// Dimensions of the underlying raster
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.image.width(), self.image.height())
    }

    /// The stride in effect
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Number of grid points this grid visits
    pub fn sample_count(&self) -> usize {
        let cols = self.image.width().div_ceil(self.stride) as usize;
        let rows = self.image.height().div_ceil(self.stride) as usize;
        cols * rows
    }

    /// Lazy row-major iterator over the sampled pixel colors
    pub fn pixels(&self) -> impl Iterator<Item = PixelColor> + 'a {
        let image = self.image;
        let stride = self.stride as usize;
        (0..image.height()).step_by(stride).flat_map(move |y| {
            (0..image.width()).step_by(stride).map(move |x| {
                let image::Rgb([r, g, b]) = *image.get_pixel(x, y);
                PixelColor::new(r, g, b)
            })
        })
    }
}
