//! Perceptual image hashing
//!
//! A decoded grayscale grid is flattened with alternating row direction,
//! binarized, and decomposed with the DWT. One coefficient band of the last
//! level is the fingerprint; two fingerprints are compared by RMS distance.

use tracing::debug;
use wavestudio_types::HashSettings;

use crate::dwt::{decompose, MotherWavelet};
use crate::error::{Result, WaveError};

/// Row-major grayscale pixel grid (values 0..=255)
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl PixelGrid {
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != width * height {
            return Err(WaveError::InvalidParameter(format!(
                "pixel grid {width}x{height} needs {} values, got {}",
                width * height,
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Build from equally long rows
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|r| r.len() != width) {
            return Err(WaveError::InvalidParameter(format!(
                "ragged pixel grid: row of {} values, expected {width}",
                row.len()
            )));
        }
        Self::new(width, rows.len(), rows.concat())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn is_square(&self, side: usize) -> bool {
        self.width == side && self.height == side
    }
}

/// Flatten rows, reading even rows left-to-right and odd rows right-to-left
pub fn flatten_boustrophedon(grid: &PixelGrid) -> Vec<f64> {
    if grid.width == 0 {
        return Vec::new();
    }
    let mut output = Vec::with_capacity(grid.values.len());
    for (y, row) in grid.values.chunks(grid.width).enumerate() {
        if y % 2 == 0 {
            output.extend(row.iter());
        } else {
            output.extend(row.iter().rev());
        }
    }
    output
}

/// Map values above `threshold` to 1 and the rest to 0
pub fn binarize(values: &[f64], threshold: f64) -> Vec<f64> {
    values
        .iter()
        .map(|&v| if v > threshold { 1.0 } else { 0.0 })
        .collect()
}

/// Fingerprint of a grid: the configured band of the last decomposition level
pub fn fingerprint(grid: &PixelGrid, settings: &HashSettings) -> Result<Vec<f64>> {
    let wavelet = MotherWavelet::load_from_name(&settings.wavelet)?;
    let signal = binarize(&flatten_boustrophedon(grid), settings.threshold);
    let levels = decompose(&signal, &wavelet, settings.levels)?;
    let coefficients = levels
        .last()
        .map(|level| level.band(settings.band).to_vec())
        .unwrap_or_default();
    debug!(
        width = grid.width,
        height = grid.height,
        coefficients = coefficients.len(),
        band = settings.band.as_str(),
        "computed fingerprint"
    );
    Ok(coefficients)
}

/// Root mean square of the element-wise difference
///
/// Two empty vectors are at distance 0.
pub fn rms_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(WaveError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    Ok((sum / a.len() as f64).sqrt())
}

/// Similarity percentage `max(0, 100 * (1 - rms))`
pub fn similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    let rms = rms_distance(a, b)?;
    Ok(((1.0 - rms) * 100.0).max(0.0))
}

/// Fingerprint both grids and compare them
pub fn match_grids(first: &PixelGrid, second: &PixelGrid, settings: &HashSettings) -> Result<f64> {
    let a = fingerprint(first, settings)?;
    let b = fingerprint(second, settings)?;
    similarity(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use wavestudio_types::Band;

    fn grid(rows: &[&[f64]]) -> PixelGrid {
        let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
        PixelGrid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_boustrophedon_order() {
        let g = grid(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        assert_eq!(
            flatten_boustrophedon(&g),
            vec![1.0, 2.0, 3.0, 6.0, 5.0, 4.0, 7.0, 8.0, 9.0]
        );
    }

    #[test]
    fn test_ragged_grid_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(PixelGrid::from_rows(&rows).is_err());
        assert!(PixelGrid::new(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_binarize_threshold_is_strict() {
        assert_eq!(binarize(&[0.0, 15.0, 16.0, 255.0], 15.0), vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_identical_grids_match_fully() {
        let g = grid(&[&[0.0, 255.0, 0.0, 255.0], &[255.0, 255.0, 0.0, 0.0]]);
        let score = match_grids(&g, &g, &HashSettings::default()).unwrap();
        assert_relative_eq!(score, 100.0);
    }

    #[test]
    fn test_fingerprint_length_is_half() {
        let g = grid(&[&[0.0; 4], &[255.0; 4], &[0.0; 4], &[255.0; 4]]);
        let fp = fingerprint(&g, &HashSettings::default()).unwrap();
        assert_eq!(fp.len(), 8);
        let mut settings = HashSettings::default();
        settings.band = Band::Approximation;
        settings.levels = 2;
        assert_eq!(fingerprint(&g, &settings).unwrap().len(), 4);
    }

    #[test]
    fn test_similarity_bounds() {
        assert_relative_eq!(similarity(&[0.0, 0.0], &[0.0, 0.0]).unwrap(), 100.0);
        assert_relative_eq!(similarity(&[0.0, 0.0], &[0.5, 0.5]).unwrap(), 50.0);
        assert_eq!(similarity(&[0.0], &[3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let err = similarity(&[0.0; 8], &[0.0; 9]).unwrap_err();
        assert!(matches!(err, WaveError::LengthMismatch { left: 8, right: 9 }));
    }

    #[test]
    fn test_unknown_wavelet_in_settings() {
        let g = grid(&[&[0.0, 1.0]]);
        let mut settings = HashSettings::default();
        settings.wavelet = "nope".into();
        assert!(matches!(
            fingerprint(&g, &settings),
            Err(WaveError::UnknownWavelet(_))
        ));
    }
}
