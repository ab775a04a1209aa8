//! Discrete wavelet transform
//!
//! Multi-level decomposition of a signal into approximation and detail bands.
//! Each level correlates the current approximation with the low-pass and
//! high-pass analysis filters and keeps every second output. The signal is
//! extended periodically at its right edge, so every band of a level holds
//! `ceil(N / 2)` coefficients for an input of `N` samples.
//!
//! # Example
//!
//! ```ignore
//! let wavelet = MotherWavelet::load_from_name("haar")?;
//! let levels = execute_dwt(&Signal::new(vec![1.0, 3.0, 5.0, 7.0]), &wavelet, 2)?;
//! assert_eq!(levels[0].approximation.len(), 2);
//! assert_eq!(levels[1].approximation.len(), 1);
//! ```

use std::f64::consts::FRAC_1_SQRT_2;

use tracing::debug;
use wavestudio_types::Band;

use crate::error::{Result, WaveError};
use crate::signal::Signal;

const DB2: [f64; 4] = [
    0.482_962_913_144_534_1,
    0.836_516_303_737_807_9,
    0.224_143_868_042_013_4,
    -0.129_409_522_551_260_4,
];

const DB3: [f64; 6] = [
    0.332_670_552_950_082_6,
    0.806_891_509_311_092_5,
    0.459_877_502_118_491_5,
    -0.135_011_020_010_254_6,
    -0.085_441_273_882_026_7,
    0.035_226_291_885_709_5,
];

const DB4: [f64; 8] = [
    0.230_377_813_308_896_5,
    0.714_846_570_552_915_6,
    0.630_880_767_929_858_9,
    -0.027_983_769_416_859_9,
    -0.187_034_811_719_093_0,
    0.030_841_381_835_560_7,
    0.032_883_011_666_885_2,
    -0.010_597_401_785_069_0,
];

const SYM4: [f64; 8] = [
    0.032_223_100_604_042_702,
    -0.012_603_967_262_037_833,
    -0.099_219_543_576_847_22,
    0.297_857_795_605_277_36,
    0.803_738_751_805_916_1,
    0.497_618_667_632_015_45,
    -0.029_635_527_645_998_51,
    -0.075_765_714_789_273_33,
];

const COIF1: [f64; 6] = [
    -0.072_732_619_512_853_9,
    0.337_897_662_457_809_2,
    0.852_572_020_212_255_4,
    0.384_864_846_864_202_86,
    -0.072_732_619_512_853_9,
    -0.015_655_728_135_464_54,
];

/// Orthogonal mother wavelet given by its analysis filter pair
#[derive(Debug, Clone, PartialEq)]
pub struct MotherWavelet {
    name: String,
    low_pass: Vec<f64>,
    high_pass: Vec<f64>,
}

impl MotherWavelet {
    /// Known wavelet names
    pub const NAMES: [&'static str; 7] = ["haar", "db1", "db2", "db3", "db4", "sym4", "coif1"];

    /// Look up a wavelet by name (case-insensitive)
    pub fn load_from_name(name: &str) -> Result<Self> {
        let key = name.trim().to_ascii_lowercase();
        let low_pass: Vec<f64> = match key.as_str() {
            "haar" | "db1" => vec![FRAC_1_SQRT_2, FRAC_1_SQRT_2],
            "db2" => DB2.to_vec(),
            "db3" => DB3.to_vec(),
            "db4" => DB4.to_vec(),
            "sym4" => SYM4.to_vec(),
            "coif1" => COIF1.to_vec(),
            _ => return Err(WaveError::UnknownWavelet(name.to_string())),
        };
        Ok(Self::from_low_pass(key, low_pass))
    }

    /// Build a wavelet from its low-pass analysis filter
    ///
    /// The high-pass filter is the quadrature mirror `hi[m] = (-1)^m lo[L-1-m]`.
    pub fn from_low_pass(name: impl Into<String>, low_pass: Vec<f64>) -> Self {
        let len = low_pass.len();
        let high_pass = (0..len)
            .map(|m| {
                let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
                sign * low_pass[len - 1 - m]
            })
            .collect();
        Self {
            name: name.into(),
            low_pass,
            high_pass,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn low_pass(&self) -> &[f64] {
        &self.low_pass
    }

    pub fn high_pass(&self) -> &[f64] {
        &self.high_pass
    }

    /// Number of filter taps
    pub fn filter_len(&self) -> usize {
        self.low_pass.len()
    }
}

/// Coefficients produced at one decomposition level
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionLevel {
    /// Level number, starting at 1 for the finest level
    pub level: usize,
    pub approximation: Vec<f64>,
    pub details: Vec<f64>,
}

impl DecompositionLevel {
    pub fn band(&self, band: Band) -> &[f64] {
        match band {
            Band::Approximation => &self.approximation,
            Band::Details => &self.details,
        }
    }
}

/// One analysis step: filter with periodic extension, then keep even outputs
pub fn decompose_level(input: &[f64], wavelet: &MotherWavelet) -> (Vec<f64>, Vec<f64>) {
    let n = input.len();
    let out_len = n.div_ceil(2);
    let mut approximation = Vec::with_capacity(out_len);
    let mut details = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let mut lo_sum = 0.0;
        let mut hi_sum = 0.0;
        for (k, (&lo, &hi)) in wavelet.low_pass.iter().zip(&wavelet.high_pass).enumerate() {
            let sample = input[(2 * i + k) % n];
            lo_sum += lo * sample;
            hi_sum += hi * sample;
        }
        approximation.push(lo_sum);
        details.push(hi_sum);
    }

    (approximation, details)
}

/// Decompose raw samples into `levels` levels
pub fn decompose(
    samples: &[f64],
    wavelet: &MotherWavelet,
    levels: usize,
) -> Result<Vec<DecompositionLevel>> {
    if levels == 0 {
        return Err(WaveError::InvalidParameter(
            "at least one decomposition level is required".into(),
        ));
    }

    let mut current = samples.to_vec();
    let mut output = Vec::with_capacity(levels);
    for level in 1..=levels {
        let (approximation, details) = decompose_level(&current, wavelet);
        debug!(
            level,
            input_len = current.len(),
            band_len = approximation.len(),
            wavelet = wavelet.name(),
            "dwt level"
        );
        current = approximation.clone();
        output.push(DecompositionLevel {
            level,
            approximation,
            details,
        });
    }
    Ok(output)
}

/// Decompose a signal into `levels` levels, finest first
pub fn execute_dwt(
    signal: &Signal,
    wavelet: &MotherWavelet,
    levels: usize,
) -> Result<Vec<DecompositionLevel>> {
    decompose(&signal.samples, wavelet, levels)
}
