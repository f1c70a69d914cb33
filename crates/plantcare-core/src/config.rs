//! Configuration structures for the analysis pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration for image analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pixel sampling strides
    pub sampling: SamplingConfig,
    /// Plant-presence gate parameters
    pub gate: GateConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            gate: GateConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()?;
        self.gate.validate()
    }
}

/// Grid spacing used when sub-sampling a raster.
///
/// Only pixels at multiples of the stride are inspected, which bounds the
/// scan cost on large uploads. Each analysis has its own stride.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Stride for the detailed disease-indicator scan
    pub detail_stride: u32,
    /// Stride for the standalone presence check
    pub gate_stride: u32,
    /// Stride for the quick pre-screen inside classification
    pub quick_stride: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            detail_stride: 8,
            gate_stride: 10,
            quick_stride: 20,
        }
    }
}

impl SamplingConfig {
    /// Validates that all strides are usable
    pub fn validate(&self) -> Result<()> {
        for (name, stride) in [
            ("detail_stride", self.detail_stride),
            ("gate_stride", self.gate_stride),
            ("quick_stride", self.quick_stride),
        ] {
            if stride == 0 {
                return Err(Error::Config(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }
}

/// Thresholds for the two plant-presence strategies.
///
/// The strict check and the quick pre-screen disagree on how green a pixel
/// must be to count as plant matter, so the two thresholds are configured
/// separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum green channel value for the strict check and detail scan
    pub green_threshold: u8,
    /// Minimum green channel value for the quick pre-screen
    pub quick_green_threshold: u8,
    /// Minimum width and height for a plausible plant photo
    pub min_dimension: u32,
    /// Lower bound (exclusive) on width/height aspect ratio
    pub min_aspect_ratio: f64,
    /// Upper bound (exclusive) on width/height aspect ratio
    pub max_aspect_ratio: f64,
    /// Green percentage above which the strict check accepts outright
    pub green_dominance_min: f64,
    /// Color variance above which texture counts toward acceptance
    pub color_variance_min: f64,
    /// Green percentage above which the quick screen flags a plant
    pub quick_green_ratio_min: f64,
    /// Green percentage below which a quick-screen negative is rejected
    pub reject_green_ratio_below: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            green_threshold: 50,
            quick_green_threshold: 30,
            min_dimension: 50,
            min_aspect_ratio: 0.2,
            max_aspect_ratio: 5.0,
            green_dominance_min: 5.0,
            color_variance_min: 20.0,
            quick_green_ratio_min: 3.0,
            reject_green_ratio_below: 2.0,
        }
    }
}

impl GateConfig {
    /// Validates gate thresholds
    pub fn validate(&self) -> Result<()> {
        if self.min_aspect_ratio >= self.max_aspect_ratio {
            return Err(Error::Config(format!(
                "min_aspect_ratio ({}) must be below max_aspect_ratio ({})",
                self.min_aspect_ratio, self.max_aspect_ratio
            )));
        }
        if self.reject_green_ratio_below > self.quick_green_ratio_min {
            return Err(Error::Config(format!(
                "reject_green_ratio_below ({}) must not exceed quick_green_ratio_min ({})",
                self.reject_green_ratio_below, self.quick_green_ratio_min
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sampling.detail_stride, 8);
        assert_eq!(config.sampling.gate_stride, 10);
        assert_eq!(config.sampling.quick_stride, 20);
        assert_eq!(config.gate.green_threshold, 50);
        assert_eq!(config.gate.quick_green_threshold, 30);
    }

    #[test]
    fn test_zero_stride_rejected() {
        let mut config = AnalysisConfig::default();
        config.sampling.quick_stride = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_aspect_bounds_rejected() {
        let mut config = AnalysisConfig::default();
        config.gate.min_aspect_ratio = 6.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
            [sampling]
            quick_stride = 16
            "#,
        )
        .unwrap();
        assert_eq!(config.sampling.quick_stride, 16);
        assert_eq!(config.sampling.detail_stride, 8);
        assert_eq!(config.gate.green_threshold, 50);
    }
}
