//! Tests for image/glyph I/O and configuration layering.

use std::fs;

use contour_cli::{
    glyph_path, load_base_config, load_glyph_table, load_image, save_image, ConfigOverrides,
};
use contour_common::ContourError;
use marching_squares::{MarchingSquares, PipelineConfig};
use tempfile::TempDir;
use test_utils::{coded_glyphs, disc_image, glyph_code_at, hashed_image, require_glyph_dir};

fn write_coded_glyphs(dir: &TempDir, step: usize) {
    for (code, glyph) in coded_glyphs(step, step).iter().enumerate() {
        save_image(glyph_path(dir.path(), code), glyph).unwrap();
    }
}

// ============================================================================
// image I/O tests
// ============================================================================

#[test]
fn test_ppm_round_trip_preserves_pixels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("source.ppm");
    let image = hashed_image(37, 21);

    save_image(&path, &image).unwrap();
    assert_eq!(load_image(&path).unwrap(), image);
}

#[test]
fn test_png_round_trip_preserves_pixels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("source.png");
    let image = disc_image(16, 12);

    save_image(&path, &image).unwrap();
    assert_eq!(load_image(&path).unwrap(), image);
}

#[test]
fn test_missing_input_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let err = load_image(dir.path().join("missing.ppm")).unwrap_err();
    assert!(matches!(err, ContourError::Decode(_)));
}

// ============================================================================
// glyph table tests
// ============================================================================

#[test]
fn test_glyph_paths() {
    assert!(glyph_path("contours", 0).ends_with("0.ppm"));
    assert!(glyph_path("contours", 15).ends_with("15.ppm"));
}

#[test]
fn test_load_glyph_table_in_code_order() {
    let dir = TempDir::new().unwrap();
    write_coded_glyphs(&dir, 8);

    let table = load_glyph_table(dir.path()).unwrap();
    assert_eq!((table.width(), table.height()), (8, 8));
    for code in 0..16u8 {
        assert_eq!(glyph_code_at(table.glyph(code), 3, 3), Some(code));
    }
}

#[test]
fn test_missing_glyph_aborts() {
    let dir = TempDir::new().unwrap();
    write_coded_glyphs(&dir, 8);
    fs::remove_file(glyph_path(dir.path(), 9)).unwrap();

    assert!(load_glyph_table(dir.path()).is_err());
}

// ============================================================================
// configuration tests
// ============================================================================

#[test]
fn test_base_config_defaults_without_file() {
    assert_eq!(load_base_config(None).unwrap(), PipelineConfig::default());
}

#[test]
fn test_base_config_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("contours.yaml");
    fs::write(&path, "workers: 2\nstep_x: 4\nstep_y: 4\ntarget_width: 512\n").unwrap();

    let config = load_base_config(Some(path.as_path())).unwrap();
    assert_eq!(config.workers, 2);
    assert_eq!((config.step_x, config.step_y), (4, 4));
    assert_eq!(config.target_width, 512);
    assert_eq!(config.target_height, 2048);
}

#[test]
fn test_missing_config_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.yaml");
    let err = load_base_config(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ContourError::InvalidConfig(_)));
}

#[test]
fn test_overrides_win_over_base() {
    let base = PipelineConfig {
        workers: 2,
        sigma: 200,
        ..Default::default()
    };
    let overrides = ConfigOverrides {
        workers: Some(8),
        sigma: Some(-1),
        ..Default::default()
    };

    let config = overrides.apply(base);
    assert_eq!(config.workers, 8);
    assert_eq!(config.sigma, -1);
    assert_eq!(config.step_x, 8);
}

// ============================================================================
// end-to-end through files
// ============================================================================

#[test]
fn test_file_to_file_run() {
    let dir = TempDir::new().unwrap();
    write_coded_glyphs(&dir, 8);
    let input = dir.path().join("in.ppm");
    let output = dir.path().join("out.ppm");
    save_image(&input, &disc_image(300, 300)).unwrap();

    let config = PipelineConfig {
        workers: 4,
        target_width: 128,
        target_height: 128,
        ..Default::default()
    };
    let pipeline = MarchingSquares::new(config, load_glyph_table(dir.path()).unwrap()).unwrap();
    let run = pipeline.run(&load_image(&input).unwrap()).unwrap();
    save_image(&output, &run.image).unwrap();

    let written = load_image(&output).unwrap();
    assert_eq!(written.dimensions(), (128, 128));
    assert_eq!(glyph_code_at(&written, 0, 0), Some(0));
    assert_eq!(glyph_code_at(&written, 64, 64), Some(15));
}

#[test]
fn test_real_glyphs_drive_pipeline() {
    let dir = require_glyph_dir!();
    let glyphs = load_glyph_table(&dir).unwrap();
    assert_eq!((glyphs.width(), glyphs.height()), (8, 8));

    let config = PipelineConfig {
        workers: 2,
        target_width: 64,
        target_height: 64,
        ..Default::default()
    };
    let run = MarchingSquares::new(config, glyphs).unwrap().run(&disc_image(64, 64)).unwrap();
    assert_eq!(run.image.dimensions(), (64, 64));
}
