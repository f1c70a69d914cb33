//! Priority-ordered disease classification.
//!
//! Applies a fixed rule table over extracted color features. Rules are
//! evaluated top-down with the most severe disease first, and the first
//! matching rule wins. Every confidence is finally clamped to [60, 95].

use plantcare_core::Disease;
use tracing::debug;

use crate::features::ColorFeatures;

/// Lower bound of the reported confidence on the normal path
pub const MIN_CONFIDENCE: u8 = 60;
/// Upper bound of the reported confidence on the normal path
pub const MAX_CONFIDENCE: u8 = 95;

/// A disease label with its computed confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnosis {
    pub disease: Disease,
    /// Confidence percentage, clamped to [`MIN_CONFIDENCE`]..=[`MAX_CONFIDENCE`]
    pub confidence: u8,
}

/// Classifies extracted features into a diagnosis.
///
/// Mosaic virus is present in the knowledge base but no rule here selects
/// it; adding such a rule needs product direction on its indicators.
pub fn classify(features: &ColorFeatures) -> Diagnosis {
    let brown = features.brown_ratio;
    let yellow = features.yellow_ratio;
    let dark = features.dark_ratio;
    let healthy = features.healthy_ratio;

    let (disease, confidence) = if brown > 15.0 || dark > 12.0 {
        let severity = brown.max(dark);
        (Disease::LateBlight, (75.0 + (severity * 0.5).round()).min(92.0))
    } else if brown > 3.0 && brown <= 15.0 {
        (Disease::EarlyBlight, (70.0 + (brown * 1.2).round()).min(90.0))
    } else if yellow > 8.0 && brown > 1.0 {
        (
            Disease::BacterialSpot,
            (68.0 + ((yellow + brown) * 0.8).round()).min(88.0),
        )
    } else if yellow > 8.0 && healthy < 60.0 {
        (Disease::YellowLeafCurl, (65.0 + yellow.round()).min(85.0))
    } else if dark > 3.0 && dark < 15.0 {
        (Disease::LeafSpot, (70.0 + dark.round()).min(87.0))
    } else if brown > 2.0 && yellow > 2.0 {
        (
            Disease::LeafMold,
            (72.0 + ((brown + yellow) * 0.8).round()).min(90.0),
        )
    } else {
        (
            Disease::Healthy,
            (80.0 + (healthy * 0.2).round()).min(95.0).max(75.0),
        )
    };

    let confidence = confidence
        .round()
        .clamp(f64::from(MIN_CONFIDENCE), f64::from(MAX_CONFIDENCE)) as u8;

    debug!(brown, yellow, dark, healthy, %disease, confidence, "disease rules applied");

    Diagnosis {
        disease,
        confidence,
    }
}
