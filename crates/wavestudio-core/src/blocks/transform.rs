//! Wavelet transform block

use wavestudio_types::{PortLayout, ProcessingType, DEFAULT_WAVELET};

use crate::block::{Execution, Inputs, Process};
use crate::dwt::{execute_dwt, MotherWavelet};
use crate::error::Result;
use crate::signal::Signal;

/// Multi-level DWT of every input signal
///
/// Output 0 receives the approximation bands and output 1 the detail bands,
/// one signal per input signal and level (finest level first).
#[derive(Debug, Clone, PartialEq)]
pub struct Dwt {
    wavelet: String,
    levels: usize,
}

impl Default for Dwt {
    fn default() -> Self {
        Self::new(DEFAULT_WAVELET, 1)
    }
}

impl Dwt {
    pub fn new(wavelet: impl Into<String>, levels: usize) -> Self {
        Self {
            wavelet: wavelet.into(),
            levels,
        }
    }

    pub fn wavelet(&self) -> &str {
        &self.wavelet
    }

    pub fn set_wavelet(&mut self, wavelet: impl Into<String>) {
        self.wavelet = wavelet.into();
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn set_levels(&mut self, levels: usize) {
        self.levels = levels;
    }
}

fn band_signal(source: &Signal, samples: Vec<f64>, band: &str, level: usize) -> Signal {
    let mut signal = source.with_samples(samples);
    signal.name = if source.name.is_empty() {
        format!("{band} {level}")
    } else {
        format!("{} {band} {level}", source.name)
    };
    let interval = source.sampling_interval() * 2f64.powi(level as i32);
    signal.set_sampling_interval(interval);
    signal.finish = signal.start + interval * signal.samples_count().saturating_sub(1) as f64;
    signal
}

impl Process for Dwt {
    fn name(&self) -> &'static str {
        "DWT"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Transform
    }

    fn ports(&self) -> PortLayout {
        PortLayout::empty()
            .with_input("Signal", "In")
            .with_output("Approximation", "A")
            .with_output("Details", "D")
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        let Some(signals) = inputs.connected(0) else {
            return Ok(Execution::Unchanged);
        };
        let wavelet = MotherWavelet::load_from_name(&self.wavelet)?;

        let mut approximations = Vec::new();
        let mut details = Vec::new();
        for signal in signals {
            for level in execute_dwt(signal, &wavelet, self.levels)? {
                approximations.push(band_signal(
                    signal,
                    level.approximation,
                    "approximation",
                    level.level,
                ));
                details.push(band_signal(signal, level.details, "details", level.level));
            }
        }
        Ok(Execution::Produced(vec![approximations, details]))
    }
}
