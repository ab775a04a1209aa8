//! Signal value type
//!
//! A [`Signal`] is a named, ordered sequence of samples with timing metadata.
//! Signals are plain values: cloning deep-copies the sample buffer.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Named numeric sequence with timing metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Display name (not required to be unique)
    pub name: String,
    /// Sample values
    pub samples: Vec<f64>,
    /// Time of the first sample
    pub start: f64,
    /// Time of the last sample
    pub finish: f64,
    /// Samples alternate real and imaginary parts
    pub is_complex: bool,
    sampling_interval: f64,
    sampling_rate: i64,
}

impl Default for Signal {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Signal {
    /// Create a signal starting at 0 with unit sampling interval
    pub fn new(samples: Vec<f64>) -> Self {
        let finish = samples.len().saturating_sub(1) as f64;
        Self {
            name: String::new(),
            samples,
            start: 0.0,
            finish,
            is_complex: false,
            sampling_interval: 1.0,
            sampling_rate: 1,
        }
    }

    /// Create a named signal
    pub fn named(name: impl Into<String>, samples: Vec<f64>) -> Self {
        let mut signal = Self::new(samples);
        signal.name = name.into();
        signal
    }

    /// Copy of this signal's metadata carrying new samples
    pub fn with_samples(&self, samples: Vec<f64>) -> Self {
        Self {
            name: self.name.clone(),
            samples,
            start: self.start,
            finish: self.finish,
            is_complex: self.is_complex,
            sampling_interval: self.sampling_interval,
            sampling_rate: self.sampling_rate,
        }
    }

    pub fn samples_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sampling_interval(&self) -> f64 {
        self.sampling_interval
    }

    /// Samples per time unit, derived from the interval
    pub fn sampling_rate(&self) -> i64 {
        self.sampling_rate
    }

    /// Set the interval; a non-zero value also recomputes the sampling rate
    pub fn set_sampling_interval(&mut self, interval: f64) {
        self.sampling_interval = interval;
        if interval != 0.0 {
            self.sampling_rate = (1.0 / interval).round() as i64;
        }
    }

    /// Builder form of [`Signal::set_sampling_interval`]
    pub fn with_sampling_interval(mut self, interval: f64) -> Self {
        self.set_sampling_interval(interval);
        self
    }

    /// Format samples with fixed precision joined by `separator`
    pub fn format_samples(&self, precision: usize, separator: &str) -> String {
        self.samples
            .iter()
            .map(|v| format!("{:.*}", precision, v))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_samples(1, " "))
    }
}

impl Index<usize> for Signal {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.samples[index]
    }
}

impl IndexMut<usize> for Signal {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.samples[index]
    }
}

impl From<Vec<f64>> for Signal {
    fn from(samples: Vec<f64>) -> Self {
        Self::new(samples)
    }
}

/// Format every signal in a list, one per line
pub fn format_signals(signals: &[Signal], precision: usize, separator: &str) -> String {
    signals
        .iter()
        .map(|s| s.format_samples(precision, separator))
        .collect::<Vec<_>>()
        .join("\n")
}
