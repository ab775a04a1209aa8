//! Wavelet kernel and hashing laws

use approx::assert_relative_eq;
use wavestudio_core::hash::{binarize, fingerprint, flatten_boustrophedon};
use wavestudio_core::math::{repeat, unique_sorted};
use wavestudio_core::prelude::*;
use wavestudio_core::{rms_distance, similarity};

#[test]
fn test_band_length_is_half_rounded_up() {
    let haar = MotherWavelet::load_from_name("Haar").unwrap();
    for n in 1..=33usize {
        let samples: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).sin()).collect();
        let levels = decompose(&samples, &haar, 1).unwrap();
        let expected = n.div_ceil(2);
        assert_eq!(levels[0].approximation.len(), expected, "n = {n}");
        assert_eq!(levels[0].details.len(), expected, "n = {n}");
    }
}

#[test]
fn test_decomposition_is_deterministic() {
    let samples: Vec<f64> = (0..64).map(|i| ((i * 37) % 11) as f64 - 5.0).collect();
    for name in MotherWavelet::NAMES {
        let wavelet = MotherWavelet::load_from_name(name).unwrap();
        let first = decompose(&samples, &wavelet, 3).unwrap();
        let second = decompose(&samples, &wavelet, 3).unwrap();
        for (a, b) in first.iter().zip(&second) {
            let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
            assert_eq!(bits(&a.approximation), bits(&b.approximation));
            assert_eq!(bits(&a.details), bits(&b.details));
        }
    }
}

#[test]
fn test_levels_feed_approximation_forward() {
    let haar = MotherWavelet::load_from_name("haar").unwrap();
    let signal = Signal::new((1..=16).map(|i| i as f64).collect());
    let levels = execute_dwt(&signal, &haar, 4).unwrap();
    assert_eq!(
        levels.iter().map(|l| l.level).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    for pair in levels.windows(2) {
        let next = decompose(&pair[0].approximation, &haar, 1).unwrap();
        assert_eq!(next[0].approximation, pair[1].approximation);
    }
    // Haar keeps the mean scaled by sqrt(2) per level
    assert_relative_eq!(levels[3].approximation[0], 8.5 * 4.0, epsilon = 1e-9);
}

#[test]
fn test_mismatched_lengths_fail() {
    let a = vec![0.0; 8];
    let b = vec![0.0; 9];
    assert!(matches!(
        rms_distance(&a, &b),
        Err(WaveError::LengthMismatch { left: 8, right: 9 })
    ));
    assert!(similarity(&a, &b).is_err());
}

#[test]
fn test_identical_grids_match_fully() {
    let rows: Vec<Vec<f64>> = (0..16)
        .map(|y| (0..16).map(|x| ((x * y) % 255) as f64).collect())
        .collect();
    let grid = PixelGrid::from_rows(&rows).unwrap();
    let settings = HashSettings {
        hash_size: 16,
        ..HashSettings::default()
    };
    assert_relative_eq!(match_grids(&grid, &grid, &settings).unwrap(), 100.0);

    let inverted = PixelGrid::from_rows(
        &rows
            .iter()
            .map(|r| r.iter().map(|v| 255.0 - v).collect())
            .collect::<Vec<_>>(),
    )
    .unwrap();
    let score = match_grids(&grid, &inverted, &settings).unwrap();
    assert!((0.0..100.0).contains(&score));
}

#[test]
fn test_fingerprint_band_selection() {
    let grid = PixelGrid::new(2, 2, vec![0.0, 255.0, 255.0, 0.0]).unwrap();
    assert_eq!(flatten_boustrophedon(&grid), vec![0.0, 255.0, 0.0, 255.0]);
    assert_eq!(binarize(&[0.0, 15.0, 16.0], 15.0), vec![0.0, 0.0, 1.0]);

    let mut settings = HashSettings::default();
    let details = fingerprint(&grid, &settings).unwrap();
    settings.band = Band::Approximation;
    let approximation = fingerprint(&grid, &settings).unwrap();
    assert_eq!(details.len(), 2);
    assert_relative_eq!(approximation[0], std::f64::consts::FRAC_1_SQRT_2);
    assert_relative_eq!(details[0], -std::f64::consts::FRAC_1_SQRT_2);
}

#[test]
fn test_array_laws() {
    assert_eq!(
        repeat(&[1.0, 9.0, 0.0, 1.0, 2.0, 5.0, -4.0, 4.0], 4, 1),
        vec![1.0, 9.0, 0.0, 1.0, 1.0, 9.0, 0.0, 1.0, 2.0, 5.0, -4.0, 4.0, 2.0, 5.0, -4.0, 4.0]
    );
    assert_eq!(
        unique_sorted(&[1.0, 3.0, -4.0, 8.0, 3.0, 4.0, 1.0, -3.0]),
        vec![-4.0, -3.0, 1.0, 3.0, 4.0, 8.0]
    );
}
