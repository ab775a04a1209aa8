//! End-to-end checks of the command-line operations on files

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use wavestudio::app::{self, AppError, Overrides};
use wavestudio::prelude::*;

fn write_grid(path: &Path, side: usize, value: impl Fn(usize, usize) -> u8) {
    let text: Vec<String> = (0..side)
        .map(|y| {
            (0..side)
                .map(|x| value(x, y).to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    fs::write(path, text.join("\n")).unwrap();
}

fn settings_for(side: usize) -> EngineSettings {
    app::resolve_settings(
        None,
        &Overrides {
            hash_size: Some(side),
            ..Overrides::default()
        },
    )
    .unwrap()
}

#[test]
fn test_same_image_scores_full_match() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    write_grid(&a, 8, |x, y| ((x * 31 + y * 17) % 256) as u8);
    write_grid(&b, 8, |x, y| ((x * 31 + y * 17) % 256) as u8);

    let score = app::match_files(&a, &b, &settings_for(8)).unwrap();
    assert_relative_eq!(score, 100.0);
}

#[test]
fn test_different_images_score_lower() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    write_grid(&a, 8, |x, _| if x % 2 == 0 { 255 } else { 0 });
    write_grid(&b, 8, |_, _| 255);

    let score = app::match_files(&a, &b, &settings_for(8)).unwrap();
    assert!(score < 100.0);
    assert!(score >= 0.0);
}

#[test]
fn test_mismatched_grid_sizes_fail() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.csv");
    let b = dir.path().join("b.csv");
    write_grid(&a, 4, |_, _| 0);
    fs::write(&b, "0,0,0\n0,0,0\n0,0,0").unwrap();

    let err = app::match_files(&a, &b, &settings_for(4)).unwrap_err();
    assert!(matches!(
        err,
        AppError::Engine(WaveError::LengthMismatch { left: 8, right: 5 })
    ));
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn test_decompose_prints_both_bands() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signals.csv");
    fs::write(&path, "1.1,9.12355,0.123456\n-1.1,0.123456").unwrap();

    let overrides = Overrides {
        levels: Some(2),
        ..Overrides::default()
    };
    let settings = app::resolve_settings(None, &overrides).unwrap();
    let text = app::decompose_file(&path, &settings).unwrap();

    assert!(text.contains("# Line 1 level 1 (haar)"));
    assert!(text.contains("# Line 2 level 2 (haar)"));
    assert_eq!(text.lines().filter(|l| l.starts_with('#')).count(), 4);
}

#[test]
fn test_settings_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut settings = EngineSettings::default();
    settings.hash.wavelet = "coif1".into();
    settings.graph.max_cascade_depth = Some(3);
    settings.save(&path).unwrap();

    let loaded = app::resolve_settings(Some(&path), &Overrides::default()).unwrap();
    assert_eq!(loaded, settings);
}
