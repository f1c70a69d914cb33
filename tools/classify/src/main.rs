//! Plant-health classification CLI
//!
//! Classifies a single image or every image under a directory, printing
//! either a human-readable summary or the same JSON the HTTP API returns.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use walkdir::WalkDir;

use plantcare_analysis::PlantAnalyzer;
use plantcare_core::{load_toml_config, setup_cli_logging, AnalysisConfig, ClassificationResult};

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Plant-health classification from leaf photos
#[derive(Parser, Debug)]
#[command(name = "plantcare-classify")]
#[command(version = "0.1.0")]
#[command(about = "Classify plant health from leaf photos", long_about = None)]
struct Cli {
    /// Image file or directory of images
    input: PathBuf,

    /// Only run the plant-presence check, skip disease classification
    #[arg(long)]
    check: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Optional analysis configuration file (TOML)
    #[arg(long, env = "PLANTCARE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_cli_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => load_toml_config::<AnalysisConfig>(path)?,
        None => AnalysisConfig::default(),
    };
    config.validate()?;

    let analyzer = PlantAnalyzer::new(config);
    let inputs = collect_inputs(&cli.input)?;
    anyhow::ensure!(
        !inputs.is_empty(),
        "no image files found under {}",
        cli.input.display()
    );

    for path in &inputs {
        if cli.check {
            run_presence_check(&analyzer, path, cli.json)?;
        } else {
            run_classification(&analyzer, path, cli.json)?;
        }
    }

    Ok(())
}

/// Expands the input path into the list of image files to process
fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn run_classification(analyzer: &PlantAnalyzer, path: &Path, json: bool) -> Result<()> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(path = %path.display(), size = bytes.len(), "classifying image");

    let result = analyzer.classify_bytes(&bytes);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_classification(path, &result);
    }
    Ok(())
}

fn run_presence_check(analyzer: &PlantAnalyzer, path: &Path, json: bool) -> Result<()> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let decoded = match image::load_from_memory(&bytes) {
        Ok(decoded) => decoded.to_rgb8(),
        Err(e) => {
            println!(
                "{}: {}",
                path.display(),
                format!("could not decode image ({e})").red()
            );
            return Ok(());
        }
    };

    let presence = analyzer.check_plant_presence(&decoded);

    if json {
        println!("{}", serde_json::to_string_pretty(&presence)?);
    } else {
        let verdict = if presence.is_plant {
            "plant".green()
        } else {
            "not a plant".red()
        };
        println!(
            "{}: {} ({:.1}% confidence, {} green, variance {})",
            path.display(),
            verdict,
            presence.confidence,
            format!("{}%", presence.analysis.green_dominance),
            presence.analysis.color_variance
        );
    }
    Ok(())
}

fn print_classification(path: &Path, result: &ClassificationResult) {
    let label = if result.disease == "Healthy Plant" {
        result.disease.green().bold()
    } else if result.is_plant {
        result.disease.yellow().bold()
    } else {
        result.disease.red().bold()
    };

    println!("{}", path.display().to_string().bold());
    println!("  Diagnosis:  {} ({}% confidence)", label, result.confidence);
    println!("  Treatment:  {}", result.medicine);
}
