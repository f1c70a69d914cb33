//! Classification pipeline and result assembly.
//!
//! [`PlantAnalyzer`] runs decode, the quick plant screen, feature extraction
//! and the disease rules, then normalizes whatever happened into a
//! [`ClassificationResult`]. Every call returns a structured result:
//! decode failures and gate rejections become dedicated result values, and
//! any unexpected fault on the classification path is replaced by a fixed
//! fallback instead of propagating to the caller.

use image::RgbImage;
use plantcare_core::{
    Analysis, AnalysisConfig, AnalysisReport, ClassificationResult, DiseaseDatabase, Error,
    ImageQuality, PlantPresence, RejectionAnalysis, Result,
};
use tracing::{info, warn};

use crate::classifier::{classify, Diagnosis};
use crate::features::{extract, ColorFeatures};
use crate::gate::{check_presence, quick_screen, QuickScreen};
use crate::sampler::SampleGrid;

/// Label reported when the uploaded bytes could not be decoded
pub const DECODE_ERROR_LABEL: &str = "Image Load Error";
/// Label reported when the quick gate rejects the image
pub const NOT_A_PLANT_LABEL: &str = "Not a Plant Image";

/// Terminal outcome of an analysis run
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The image passed the quick screen and was classified
    Classified {
        diagnosis: Diagnosis,
        features: ColorFeatures,
        screen: QuickScreen,
    },
    /// The quick screen rejected the image as not containing a plant
    Rejected { screen: QuickScreen },
    /// The raster could not be decoded from the input bytes
    DecodeFailed,
}

impl Outcome {
    /// Normalizes the outcome into the flat wire result.
    ///
    /// Only the classified arm can fail (knowledge-base lookup); callers
    /// route that failure into the fallback result.
    pub fn into_result(self) -> Result<ClassificationResult> {
        match self {
            Outcome::DecodeFailed => Ok(decode_failure_result()),
            Outcome::Rejected { screen } => Ok(rejection_result(&screen)),
            Outcome::Classified {
                diagnosis,
                features,
                screen,
            } => classified_result(diagnosis, &features, &screen),
        }
    }
}

fn decode_failure_result() -> ClassificationResult {
    ClassificationResult {
        disease: DECODE_ERROR_LABEL.to_string(),
        confidence: 0,
        medicine: plantcare_core::DECODE_ERROR_ADVICE.to_string(),
        is_plant: false,
        analysis: Analysis::error("Image read failed"),
    }
}

fn rejection_result(screen: &QuickScreen) -> ClassificationResult {
    ClassificationResult {
        disease: NOT_A_PLANT_LABEL.to_string(),
        confidence: (100.0 - screen.green_ratio * 10.0).round() as u8,
        medicine: plantcare_core::NOT_A_PLANT_ADVICE.to_string(),
        is_plant: false,
        analysis: Analysis::Rejection(RejectionAnalysis {
            green_ratio: screen.green_ratio.round() as u32,
            dimensions: screen.dimensions.to_string(),
        }),
    }
}

fn classified_result(
    diagnosis: Diagnosis,
    features: &ColorFeatures,
    screen: &QuickScreen,
) -> Result<ClassificationResult> {
    let treatment = DiseaseDatabase::global()
        .treatment(diagnosis.disease)
        .ok_or_else(|| {
            Error::Analysis(format!(
                "no knowledge-base entry for {}",
                diagnosis.disease
            ))
        })?;

    Ok(ClassificationResult {
        disease: diagnosis.disease.label().to_string(),
        confidence: diagnosis.confidence,
        medicine: treatment.to_string(),
        is_plant: true,
        analysis: Analysis::Report(AnalysisReport {
            brown_spots: features.brown_ratio.round() as u32,
            yellow_areas: features.yellow_ratio.round() as u32,
            dark_spots: features.dark_ratio.round() as u32,
            healthy_green: features.healthy_ratio.round() as u32,
            image_quality: ImageQuality {
                dimensions: features.dimensions.to_string(),
                green_ratio: screen.green_ratio.round() as u32,
            },
        }),
    })
}

/// Fixed result substituted when the classification path faults unexpectedly
fn fallback_result() -> ClassificationResult {
    ClassificationResult {
        disease: plantcare_core::Disease::Healthy.label().to_string(),
        confidence: 70,
        medicine: plantcare_core::FALLBACK_ADVICE.to_string(),
        is_plant: true,
        analysis: Analysis::error("Analysis completed with default values"),
    }
}

/// Runs the heuristic plant-health pipeline.
///
/// Holds only configuration, so a single analyzer can serve concurrent
/// calls; every entry point is a pure function of the raster bytes.
#[derive(Debug, Clone, Default)]
pub struct PlantAnalyzer {
    config: AnalysisConfig,
}

impl PlantAnalyzer {
    /// Creates an analyzer with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The configuration in effect
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Decodes the bytes and classifies the image.
    ///
    /// A decode failure produces the "Image Load Error" result; nothing
    /// else is attempted for undecodable input.
    pub fn classify_bytes(&self, bytes: &[u8]) -> ClassificationResult {
        match image::load_from_memory(bytes) {
            Ok(decoded) => self.classify_image(&decoded.to_rgb8()),
            Err(e) => {
                warn!("image decode failed: {e}");
                recover(Outcome::DecodeFailed.into_result())
            }
        }
    }

    /// Classifies an already-decoded raster.
    ///
    /// Never fails: gate rejections are valid results and unexpected
    /// faults are recovered into the fallback result.
    pub fn classify_image(&self, image: &RgbImage) -> ClassificationResult {
        let result = recover(self.try_classify(image));
        info!(
            disease = %result.disease,
            confidence = result.confidence,
            is_plant = result.is_plant,
            "classification finished"
        );
        result
    }

    /// Runs the standalone strict presence check
    pub fn check_plant_presence(&self, image: &RgbImage) -> PlantPresence {
        check_presence(image, &self.config)
    }

    fn try_classify(&self, image: &RgbImage) -> Result<ClassificationResult> {
        let screen = quick_screen(image, &self.config);
        if screen.rejects(&self.config.gate) {
            return Outcome::Rejected { screen }.into_result();
        }

        let grid = SampleGrid::new(image, self.config.sampling.detail_stride);
        let features = extract(&grid, self.config.gate.green_threshold);
        let diagnosis = classify(&features);

        Outcome::Classified {
            diagnosis,
            features,
            screen,
        }
        .into_result()
    }
}

/// Recovery combinator: any error becomes the fixed fallback result
fn recover(result: Result<ClassificationResult>) -> ClassificationResult {
    result.unwrap_or_else(|e| {
        warn!("analysis fault recovered with default result: {e}");
        fallback_result()
    })
}
