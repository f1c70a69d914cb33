//! Core type definitions for the plantcare project.

use serde::{Deserialize, Serialize};

/// A single RGB pixel sampled from a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelColor {
    /// Red channel (0-255)
    pub red: u8,
    /// Green channel (0-255)
    pub green: u8,
    /// Blue channel (0-255)
    pub blue: u8,
}

impl PixelColor {
    /// Creates a new pixel color
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl From<[u8; 3]> for PixelColor {
    fn from(channels: [u8; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }
}

/// Raster dimensions in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageDimensions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDimensions {
    /// Creates new image dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl std::fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Disease categories known to the classifier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Disease {
    /// No disease indicators found
    Healthy,
    /// Early blight (Alternaria)
    EarlyBlight,
    /// Late blight (Phytophthora)
    LateBlight,
    /// Bacterial spot
    BacterialSpot,
    /// Leaf mold
    LeafMold,
    /// Leaf spot
    LeafSpot,
    /// Tomato yellow leaf curl virus
    YellowLeafCurl,
    /// Mosaic virus
    MosaicVirus,
}

impl Disease {
    /// All known diseases, in knowledge-base order
    pub const ALL: [Disease; 8] = [
        Disease::Healthy,
        Disease::EarlyBlight,
        Disease::LateBlight,
        Disease::BacterialSpot,
        Disease::LeafMold,
        Disease::LeafSpot,
        Disease::YellowLeafCurl,
        Disease::MosaicVirus,
    ];

    /// Human-readable label, as reported to API clients
    pub fn label(&self) -> &'static str {
        match self {
            Disease::Healthy => "Healthy Plant",
            Disease::EarlyBlight => "Early Blight",
            Disease::LateBlight => "Late Blight",
            Disease::BacterialSpot => "Bacterial Spot",
            Disease::LeafMold => "Leaf Mold",
            Disease::LeafSpot => "Leaf Spot",
            Disease::YellowLeafCurl => "Yellow Leaf Curl Virus",
            Disease::MosaicVirus => "Mosaic Virus",
        }
    }

    /// Stable snake_case key for lookups and config files
    pub fn key(&self) -> &'static str {
        match self {
            Disease::Healthy => "healthy",
            Disease::EarlyBlight => "early_blight",
            Disease::LateBlight => "late_blight",
            Disease::BacterialSpot => "bacterial_spot",
            Disease::LeafMold => "leaf_mold",
            Disease::LeafSpot => "leaf_spot",
            Disease::YellowLeafCurl => "yellow_leaf_curl",
            Disease::MosaicVirus => "mosaic_virus",
        }
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Final structured result of a classification call.
///
/// Serializes to the flat wire object `{disease, confidence, medicine,
/// isPlant, analysis}`. `confidence` is an integer percentage; clients rely
/// on the field names and on integer typing staying stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationResult {
    /// Disease label shown to the user
    pub disease: String,
    /// Confidence percentage
    pub confidence: u8,
    /// Treatment recommendation
    pub medicine: String,
    /// Whether the image was judged to contain a plant
    #[serde(rename = "isPlant")]
    pub is_plant: bool,
    /// Per-call diagnostics
    pub analysis: Analysis,
}

/// Diagnostics attached to a classification result.
///
/// The shape depends on which path produced the result, so the wire format
/// is untagged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Analysis {
    /// Normal path: rounded disease-indicator percentages
    Report(AnalysisReport),
    /// Quick gate rejected the image
    Rejection(RejectionAnalysis),
    /// Decode failure or recovered analysis fault
    Error(ErrorAnalysis),
}

impl Analysis {
    /// Diagnostic marker for failed or degraded analyses
    pub fn error(message: impl Into<String>) -> Self {
        Analysis::Error(ErrorAnalysis {
            error: message.into(),
        })
    }
}

/// Rounded disease-indicator percentages for a classified image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    #[serde(rename = "brownSpots")]
    pub brown_spots: u32,
    #[serde(rename = "yellowAreas")]
    pub yellow_areas: u32,
    #[serde(rename = "darkSpots")]
    pub dark_spots: u32,
    #[serde(rename = "healthyGreen")]
    pub healthy_green: u32,
    #[serde(rename = "imageQuality")]
    pub image_quality: ImageQuality,
}

/// Coarse image-quality indicators included with a report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageQuality {
    /// Dimensions as a "WxH" string
    pub dimensions: String,
    /// Rounded green percentage from the quick screen
    #[serde(rename = "greenRatio")]
    pub green_ratio: u32,
}

/// Diagnostics for an image the quick gate rejected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RejectionAnalysis {
    #[serde(rename = "greenRatio")]
    pub green_ratio: u32,
    pub dimensions: String,
}

/// Diagnostic marker carried by error and fallback results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorAnalysis {
    pub error: String,
}

/// Result of the standalone plant-presence check.
///
/// Unlike [`ClassificationResult::confidence`], this confidence is a float;
/// clients rely on that distinction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantPresence {
    #[serde(rename = "isPlant")]
    pub is_plant: bool,
    /// Blended presence confidence, clamped to [50, 95]
    pub confidence: f64,
    pub analysis: PresenceAnalysis,
}

/// Diagnostics attached to a presence check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresenceAnalysis {
    #[serde(rename = "greenDominance")]
    pub green_dominance: u32,
    #[serde(rename = "colorVariance")]
    pub color_variance: u32,
    pub dimensions: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_color() {
        let c = PixelColor::new(10, 20, 30);
        assert_eq!(c.red, 10);
        assert_eq!(c.green, 20);
        assert_eq!(c.blue, 30);
        assert_eq!(PixelColor::from([10, 20, 30]), c);
    }

    #[test]
    fn test_dimensions_display() {
        let dims = ImageDimensions::new(200, 150);
        assert_eq!(dims.to_string(), "200x150");
        assert!((dims.aspect_ratio() - 200.0 / 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_disease_labels() {
        assert_eq!(Disease::Healthy.label(), "Healthy Plant");
        assert_eq!(Disease::YellowLeafCurl.label(), "Yellow Leaf Curl Virus");
        assert_eq!(Disease::LateBlight.to_string(), "Late Blight");
        assert_eq!(Disease::ALL.len(), 8);
    }

    #[test]
    fn test_disease_keys_are_unique() {
        let mut keys: Vec<&str> = Disease::ALL.iter().map(|d| d.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn test_result_wire_field_names() {
        let result = ClassificationResult {
            disease: "Healthy Plant".to_string(),
            confidence: 80,
            medicine: "No treatment needed.".to_string(),
            is_plant: true,
            analysis: Analysis::Report(AnalysisReport {
                brown_spots: 1,
                yellow_areas: 2,
                dark_spots: 3,
                healthy_green: 90,
                image_quality: ImageQuality {
                    dimensions: "200x150".to_string(),
                    green_ratio: 42,
                },
            }),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isPlant"], true);
        assert_eq!(json["confidence"], 80);
        assert_eq!(json["analysis"]["brownSpots"], 1);
        assert_eq!(json["analysis"]["imageQuality"]["greenRatio"], 42);
        assert_eq!(json["analysis"]["imageQuality"]["dimensions"], "200x150");
    }

    #[test]
    fn test_error_analysis_shape() {
        let analysis = Analysis::error("Image read failed");
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["error"], "Image read failed");
    }

    #[test]
    fn test_presence_confidence_is_float_on_the_wire() {
        let presence = PlantPresence {
            is_plant: true,
            confidence: 61.5,
            analysis: PresenceAnalysis {
                green_dominance: 6,
                color_variance: 25,
                dimensions: "200x150".to_string(),
            },
        };

        let json = serde_json::to_value(&presence).unwrap();
        assert!(json["confidence"].is_f64());
        assert_eq!(json["analysis"]["greenDominance"], 6);
    }
}
