//! End-to-end pipeline tests over synthetic rasters.

use image::{Rgb, RgbImage};
use plantcare_analysis::PlantAnalyzer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
    bytes
}

/// Random but reproducible leaf-like raster for determinism checks.
fn noisy_raster(seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(320, 240, |_, _| {
        Rgb([rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>()])
    })
}

#[test]
fn all_black_raster_is_late_blight_at_92() {
    let result = PlantAnalyzer::default().classify_image(&uniform(200, 200, [0, 0, 0]));
    assert_eq!(result.disease, "Late Blight");
    assert_eq!(result.confidence, 92);
    assert!(result.is_plant);
}

#[test]
fn lush_green_raster_is_healthy_at_95() {
    let result = PlantAnalyzer::default().classify_image(&uniform(200, 150, [50, 200, 50]));
    assert_eq!(result.disease, "Healthy Plant");
    assert_eq!(result.confidence, 95);
    assert!(result.is_plant);
    assert!(result
        .medicine
        .starts_with("No treatment needed. Your plant is healthy!"));
}

#[test]
fn white_raster_is_healthy_at_80() {
    // Large enough to pass the lenient screen, matching no indicator.
    let result = PlantAnalyzer::default().classify_image(&uniform(200, 200, [255, 255, 255]));
    assert_eq!(result.disease, "Healthy Plant");
    assert_eq!(result.confidence, 80);
}

#[test]
fn tiny_white_raster_is_rejected_at_100() {
    let result = PlantAnalyzer::default().classify_image(&uniform(10, 10, [255, 255, 255]));
    assert_eq!(result.disease, "Not a Plant Image");
    assert_eq!(result.confidence, 100);
    assert!(!result.is_plant);
}

#[test]
fn brown_lesions_on_green_classify_as_early_blight() {
    // Roughly 10% of sampled pixels are brown, the rest healthy green.
    let img = RgbImage::from_fn(400, 300, |x, y| {
        if (x / 8 + y / 8) % 10 == 0 {
            Rgb([130, 70, 40])
        } else {
            Rgb([60, 180, 60])
        }
    });
    let result = PlantAnalyzer::default().classify_image(&img);
    assert_eq!(result.disease, "Early Blight");
    assert!((60..=95).contains(&result.confidence));
}

#[test]
fn confidence_is_bounded_on_every_path() {
    for seed in 0..8 {
        let result = PlantAnalyzer::default().classify_image(&noisy_raster(seed));
        if result.disease == "Not a Plant Image" {
            assert!(result.confidence <= 100);
        } else {
            assert!(
                (60..=95).contains(&result.confidence),
                "seed {seed}: {} at {}",
                result.disease,
                result.confidence
            );
        }
    }
}

#[test]
fn classification_is_deterministic() {
    let analyzer = PlantAnalyzer::default();
    let bytes = png_bytes(&noisy_raster(7));
    let first = analyzer.classify_bytes(&bytes);
    let second = analyzer.classify_bytes(&bytes);
    assert_eq!(first, second);
}

#[test]
fn decode_failure_yields_error_result_not_panic() {
    let result = PlantAnalyzer::default().classify_bytes(&[0x00, 0x01, 0x02, 0x03]);
    assert_eq!(result.disease, "Image Load Error");
    assert_eq!(result.confidence, 0);
    assert!(!result.is_plant);
}

#[test]
fn empty_raster_still_returns_a_result() {
    let result = PlantAnalyzer::default().classify_image(&RgbImage::new(0, 0));
    // Zero samples means zero green, and a 0x0 image fails the size test.
    assert_eq!(result.disease, "Not a Plant Image");
    assert_eq!(result.confidence, 100);
}

#[test]
fn classified_wire_format_is_stable() {
    let result = PlantAnalyzer::default().classify_image(&uniform(200, 150, [50, 200, 50]));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["disease"], "Healthy Plant");
    assert_eq!(json["isPlant"], true);
    assert!(json["confidence"].is_u64());
    assert_eq!(json["analysis"]["healthyGreen"], 100);
    assert_eq!(json["analysis"]["brownSpots"], 0);
    assert_eq!(json["analysis"]["imageQuality"]["dimensions"], "200x150");
    assert_eq!(json["analysis"]["imageQuality"]["greenRatio"], 100);
}

#[test]
fn presence_check_accepts_real_sized_green_photo() {
    let analyzer = PlantAnalyzer::default();
    // Green patches over a varied background give both dominance and
    // texture at a sane size.
    let img = RgbImage::from_fn(200, 150, |x, y| {
        if (x + y) % 3 == 0 {
            Rgb([40, 160, 40])
        } else {
            Rgb([(x % 200) as u8, 80, (y % 150) as u8])
        }
    });
    let presence = analyzer.check_plant_presence(&img);
    assert!(presence.is_plant);
    assert!((50.0..=95.0).contains(&presence.confidence));
    assert_eq!(presence.analysis.dimensions, "200x150");
}

#[test]
fn presence_check_rejects_blank_card() {
    let presence =
        PlantAnalyzer::default().check_plant_presence(&uniform(200, 150, [240, 240, 240]));
    assert!(!presence.is_plant);
}
