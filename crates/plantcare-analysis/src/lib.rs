//! Heuristic plant-health analysis pipeline.
//!
//! This crate turns a decoded raster into a plant-health classification:
//! a disease label, a confidence percentage, a treatment recommendation and
//! a plant-presence flag. The pipeline is a fixed heuristic over color
//! ratios, not a trained model:
//!
//! 1. [`SampleGrid`] walks the raster at a fixed stride.
//! 2. [`extract`] reduces the sampled pixels into color-ratio features.
//! 3. The plant gates ([`quick_screen`], [`check_presence`]) decide whether
//!    the image plausibly contains a plant.
//! 4. [`classify`] applies a priority-ordered rule set over the features.
//! 5. [`PlantAnalyzer`] assembles the outcome into a structured result and
//!    guarantees that every call returns one.
//!
//! Every stage is a pure function of the raster and the configuration, so
//! identical input bytes always produce identical results.

pub mod classifier;
pub mod features;
pub mod gate;
pub mod pipeline;
pub mod sampler;

pub use classifier::{classify, Diagnosis};
pub use features::{extract, ColorFeatures, HEALTHY_GREEN_THRESHOLD};
pub use gate::{check_presence, evaluate_presence, quick_screen, QuickScreen};
pub use pipeline::{Outcome, PlantAnalyzer};
pub use sampler::SampleGrid;
