//! Color-feature extraction.
//!
//! Reduces a sampled pixel sequence into aggregate color ratios and a color
//! dispersion measure. Each ratio is the percentage of sampled pixels that
//! match a fixed per-pixel predicate; an empty sample set produces all-zero
//! features instead of dividing by zero.

use plantcare_core::{ImageDimensions, PixelColor};
use serde::{Deserialize, Serialize};

use crate::sampler::SampleGrid;

/// Green threshold used for the healthy-green indicator
pub const HEALTHY_GREEN_THRESHOLD: u8 = 50;

/// Green pixel: green dominates both other channels and clears the threshold
pub fn is_green(color: &PixelColor, threshold: u8) -> bool {
    color.green > color.red && color.green > color.blue && color.green > threshold
}

/// Brown pixel, a lesion indicator
pub fn is_brown(color: &PixelColor) -> bool {
    let red = f64::from(color.red);
    color.red > 80
        && f64::from(color.green) < red * 0.9
        && f64::from(color.blue) < red * 0.9
        && i32::from(color.red) > i32::from(color.green) + 15
}

/// Yellow pixel, a chlorosis indicator
pub fn is_yellow(color: &PixelColor) -> bool {
    color.red > 120
        && color.green > 120
        && color.blue < 120
        && (i32::from(color.red) - i32::from(color.green)).abs() < 40
}

/// Dark pixel, a necrosis indicator
pub fn is_dark(color: &PixelColor) -> bool {
    color.red < 100 && color.green < 100 && color.blue < 100
}

/// Aggregate color features of a sampled raster.
///
/// All ratios are percentages in `[0, 100]`; `color_variance` is the mean
/// Euclidean distance of sampled colors from their mean color and is never
/// negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorFeatures {
    pub green_ratio: f64,
    pub brown_ratio: f64,
    pub yellow_ratio: f64,
    pub dark_ratio: f64,
    pub healthy_ratio: f64,
    pub color_variance: f64,
    pub dimensions: ImageDimensions,
}

impl ColorFeatures {
    /// Width divided by height of the source raster
    pub fn aspect_ratio(&self) -> f64 {
        self.dimensions.aspect_ratio()
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Reduces the grid's pixel sequence into [`ColorFeatures`].
///
/// `green_threshold` parameterizes the green predicate only; the
/// healthy-green indicator always uses [`HEALTHY_GREEN_THRESHOLD`].
/// Deterministic: the same raster and stride always produce the same
/// features.
pub fn extract(grid: &SampleGrid<'_>, green_threshold: u8) -> ColorFeatures {
    let mut total = 0usize;
    let mut green = 0usize;
    let mut brown = 0usize;
    let mut yellow = 0usize;
    let mut dark = 0usize;
    let mut healthy = 0usize;
    let mut sum_red = 0.0f64;
    let mut sum_green = 0.0f64;
    let mut sum_blue = 0.0f64;

    for color in grid.pixels() {
        total += 1;
        if is_green(&color, green_threshold) {
            green += 1;
        }
        if is_brown(&color) {
            brown += 1;
        }
        if is_yellow(&color) {
            yellow += 1;
        }
        if is_dark(&color) {
            dark += 1;
        }
        if is_green(&color, HEALTHY_GREEN_THRESHOLD) {
            healthy += 1;
        }
        sum_red += f64::from(color.red);
        sum_green += f64::from(color.green);
        sum_blue += f64::from(color.blue);
    }

    // Second pass: mean Euclidean distance from the mean color.
    let color_variance = if total == 0 {
        0.0
    } else {
        let n = total as f64;
        let (mean_red, mean_green, mean_blue) = (sum_red / n, sum_green / n, sum_blue / n);
        let total_distance: f64 = grid
            .pixels()
            .map(|color| {
                let dr = f64::from(color.red) - mean_red;
                let dg = f64::from(color.green) - mean_green;
                let db = f64::from(color.blue) - mean_blue;
                (dr * dr + dg * dg + db * db).sqrt()
            })
            .sum();
        total_distance / n
    };

    ColorFeatures {
        green_ratio: percent(green, total),
        brown_ratio: percent(brown, total),
        yellow_ratio: percent(yellow, total),
        dark_ratio: percent(dark, total),
        healthy_ratio: percent(healthy, total),
        color_variance,
        dimensions: grid.dimensions(),
    }
}
