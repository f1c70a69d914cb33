//! Static disease knowledge base.
//!
//! Maps each disease to its treatment recommendation and the confidence
//! range the heuristic is expected to produce for it. The database is built
//! once on first access and is read-only for the lifetime of the process;
//! there is deliberately no write path.

use std::sync::OnceLock;

use serde::Serialize;

use crate::types::Disease;

/// Treatment advice returned when the uploaded bytes cannot be decoded
pub const DECODE_ERROR_ADVICE: &str = "Could not read the image file. \
    Please ensure it is a valid image format (JPG, PNG, GIF, WEBP).";

/// Treatment advice returned when the quick gate rejects an image
pub const NOT_A_PLANT_ADVICE: &str = "This image does not appear to contain \
    a plant. Please upload a clear photo of plant leaves. Make sure the image \
    shows plant leaves with good lighting and focus.";

/// Treatment advice returned by the recovered-fault fallback result
pub const FALLBACK_ADVICE: &str = "Image analysis completed. Your plant \
    appears to be in good condition. Continue regular care.";

/// One entry of the disease knowledge base
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiseaseEntry {
    /// The disease this entry describes
    pub disease: Disease,
    /// Treatment recommendation shown to the user
    pub treatment: &'static str,
    /// Inclusive confidence range the classifier is expected to report
    pub confidence_range: (u8, u8),
}

/// The process-wide disease knowledge base
#[derive(Debug)]
pub struct DiseaseDatabase {
    entries: Vec<DiseaseEntry>,
}

impl DiseaseDatabase {
    /// Shared read-only instance, constructed on first access
    pub fn global() -> &'static DiseaseDatabase {
        static DATABASE: OnceLock<DiseaseDatabase> = OnceLock::new();
        DATABASE.get_or_init(DiseaseDatabase::build)
    }

    fn build() -> Self {
        let entries = vec![
            DiseaseEntry {
                disease: Disease::Healthy,
                treatment: "No treatment needed. Your plant is healthy! \
                    Continue regular care with proper watering, sunlight, and nutrients.",
                confidence_range: (85, 95),
            },
            DiseaseEntry {
                disease: Disease::EarlyBlight,
                treatment: "Apply fungicide containing chlorothalonil or mancozeb. \
                    Remove affected leaves. Improve air circulation and avoid overhead watering.",
                confidence_range: (70, 90),
            },
            DiseaseEntry {
                disease: Disease::LateBlight,
                treatment: "Use copper-based fungicides. Remove and destroy infected \
                    plants immediately. Avoid overhead watering and ensure proper spacing.",
                confidence_range: (75, 92),
            },
            DiseaseEntry {
                disease: Disease::BacterialSpot,
                treatment: "Apply copper-based bactericides. Remove infected leaves. \
                    Water at the base, not on leaves. Improve plant spacing.",
                confidence_range: (68, 88),
            },
            DiseaseEntry {
                disease: Disease::LeafMold,
                treatment: "Improve ventilation and reduce humidity. Apply fungicide \
                    with chlorothalonil. Remove affected leaves and ensure proper spacing.",
                confidence_range: (72, 90),
            },
            DiseaseEntry {
                disease: Disease::LeafSpot,
                treatment: "Remove affected leaves immediately. Apply neem oil or \
                    copper fungicide. Ensure proper spacing and avoid wetting leaves.",
                confidence_range: (70, 87),
            },
            DiseaseEntry {
                disease: Disease::YellowLeafCurl,
                treatment: "Control whiteflies (vectors) with systemic insecticides. \
                    Remove and destroy infected plants. Use virus-free seeds and resistant varieties.",
                confidence_range: (65, 85),
            },
            // No heuristic rule currently selects Mosaic Virus; the entry is
            // kept so the knowledge base covers every known disease.
            DiseaseEntry {
                disease: Disease::MosaicVirus,
                treatment: "Remove and destroy infected plants immediately. Control \
                    aphids and other vectors. Use virus-free seeds and practice crop rotation.",
                confidence_range: (60, 80),
            },
        ];

        Self { entries }
    }

    /// Looks up the entry for a disease
    pub fn entry(&self, disease: Disease) -> Option<&DiseaseEntry> {
        self.entries.iter().find(|e| e.disease == disease)
    }

    /// Looks up the treatment text for a disease
    pub fn treatment(&self, disease: Disease) -> Option<&'static str> {
        self.entry(disease).map(|e| e.treatment)
    }

    /// Iterates over all entries
    pub fn iter(&self) -> impl Iterator<Item = &DiseaseEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the database holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_covers_every_disease() {
        let db = DiseaseDatabase::global();
        assert_eq!(db.len(), Disease::ALL.len());
        for disease in Disease::ALL {
            assert!(db.entry(disease).is_some(), "missing entry: {disease}");
        }
    }

    #[test]
    fn test_global_is_shared() {
        let a = DiseaseDatabase::global() as *const _;
        let b = DiseaseDatabase::global() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn test_confidence_ranges_are_ordered() {
        for entry in DiseaseDatabase::global().iter() {
            let (lo, hi) = entry.confidence_range;
            assert!(lo <= hi, "inverted range for {}", entry.disease);
            assert!(hi <= 100);
        }
    }

    #[test]
    fn test_treatment_lookup() {
        let db = DiseaseDatabase::global();
        let advice = db.treatment(Disease::LateBlight).unwrap();
        assert!(advice.starts_with("Use copper-based fungicides."));
        assert!(db.treatment(Disease::MosaicVirus).is_some());
    }
}
