//! Array-level math primitives
//!
//! Stateless functions over sample slices and [`Signal`]s. Functions taking a
//! slice return a freshly allocated vector and never modify their input.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::error::{Result, WaveError};
use crate::signal::Signal;

/// Absolute value of every sample
pub fn abs(samples: &[f64]) -> Vec<f64> {
    samples.iter().map(|v| v.abs()).collect()
}

/// Magnitude of interleaved `(re, im)` pairs
///
/// An odd trailing sample is paired with a zero imaginary part, so the output
/// has `ceil(n / 2)` values.
pub fn abs_from_complex(samples: &[f64]) -> Vec<f64> {
    samples
        .chunks(2)
        .map(|pair| {
            let im = pair.get(1).copied().unwrap_or(0.0);
            Complex64::new(pair[0], im).norm()
        })
        .collect()
}

/// Absolute value of a signal; complex signals become real magnitudes
pub fn abs_signal(signal: &Signal) -> Signal {
    if signal.is_complex {
        let mut output = signal.with_samples(abs_from_complex(&signal.samples));
        output.is_complex = false;
        output
    } else {
        signal.with_samples(abs(&signal.samples))
    }
}

/// Divide every sample by `divisor`
pub fn normalize(samples: &[f64], divisor: usize) -> Vec<f64> {
    let divisor = divisor as f64;
    samples.iter().map(|v| v / divisor).collect()
}

/// Sort ascending and collapse values equal within `f64::EPSILON`
pub fn unique_sorted(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup_by(|next, kept| (*next - *kept).abs() <= f64::EPSILON);
    sorted
}

/// Drop repeated values, keeping the first occurrence of each
pub fn unique(samples: &[f64]) -> Vec<f64> {
    let mut output: Vec<f64> = Vec::with_capacity(samples.len());
    for &value in samples {
        if !output.iter().any(|&seen| seen == value) {
            output.push(value);
        }
    }
    output
}

/// Map `x` from `[current_min, current_max]` onto `[new_min, new_max]`
pub fn scale(x: f64, current_min: f64, current_max: f64, new_min: f64, new_max: f64) -> f64 {
    new_min + (x - current_min) / (current_max - current_min) * (new_max - new_min)
}

/// Scale the amplitude and time axis of a signal
///
/// The time axis (`finish` and sampling interval) only changes when
/// `time_factor` differs from 1 and is positive.
pub fn scale_signal(signal: &Signal, amplitude_factor: f64, time_factor: f64) -> Signal {
    let mut output = signal.clone();
    if (amplitude_factor - 1.0).abs() > f64::EPSILON {
        for sample in output.samples.iter_mut() {
            *sample *= amplitude_factor;
        }
    }
    if (time_factor - 1.0).abs() > f64::EPSILON && time_factor > 0.0 {
        output.finish *= time_factor;
        let interval = output.sampling_interval() * time_factor;
        output.set_sampling_interval(interval);
    }
    output
}

/// Delay a signal by moving its start and finish
pub fn shift(signal: &mut Signal, delay: f64) {
    signal.start += delay;
    signal.finish += delay;
}

/// Clamp `value` into `[min, max]`
pub fn limit_range(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}

/// Reverse sample order
pub fn invert(samples: &[f64]) -> Vec<f64> {
    samples.iter().rev().copied().collect()
}

pub fn is_power_of_2(x: i64) -> bool {
    x != 0 && (x & (x - 1)) == 0
}

fn check_factor(factor: usize) -> Result<()> {
    if factor == 0 {
        return Err(WaveError::InvalidParameter(
            "resampling factor must be positive".into(),
        ));
    }
    Ok(())
}

/// Decimate by `factor`
///
/// Without `invert` the samples at indices that are NOT multiples of `factor`
/// are kept and the output holds `len / factor` values. With `invert` only the
/// multiples are kept, giving `ceil(len / factor)` values.
pub fn down_sample(input: &[f64], factor: usize, invert: bool) -> Result<Vec<f64>> {
    check_factor(factor)?;
    let size = if invert {
        input.len().div_ceil(factor)
    } else {
        input.len() / factor
    };
    Ok(input
        .iter()
        .enumerate()
        .filter(|(i, _)| (i % factor == 0) == invert)
        .map(|(_, &v)| v)
        .take(size)
        .collect())
}

/// Insert `factor - 1` zeros after each sample
///
/// With `pad_right == false` the trailing zero run is omitted.
pub fn up_sample(input: &[f64], factor: usize, pad_right: bool) -> Result<Vec<f64>> {
    check_factor(factor)?;
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let mut size = input.len() * factor;
    if !pad_right {
        size -= factor - 1;
    }
    let mut output = vec![0.0; size];
    for (i, &v) in input.iter().enumerate() {
        output[i * factor] = v;
    }
    Ok(output)
}

/// Emit frames of `frame_size` samples `repetition_count + 1` times each
///
/// The last frame may be shorter. A zero frame size or repetition count
/// returns a copy of the input.
pub fn repeat(samples: &[f64], frame_size: usize, repetition_count: usize) -> Vec<f64> {
    if frame_size == 0 || repetition_count == 0 {
        return samples.to_vec();
    }
    let capacity = repetition_count
        .checked_add(1)
        .and_then(|copies| samples.len().checked_mul(copies))
        .unwrap_or(samples.len());
    let mut output = Vec::with_capacity(capacity);
    for frame in samples.chunks(frame_size) {
        for _ in 0..=repetition_count {
            output.extend_from_slice(frame);
        }
    }
    output
}

/// [`repeat`] applied to a signal
///
/// With `keep_sampling_rate` the interval is kept and `finish` moves to cover
/// the new samples; otherwise the time span is kept and the interval shrinks.
pub fn repeat_signal(
    signal: &Signal,
    frame_size: usize,
    repetition_count: usize,
    keep_sampling_rate: bool,
) -> Signal {
    let mut output = signal.with_samples(repeat(&signal.samples, frame_size, repetition_count));
    let count = output.samples_count() as f64;
    if keep_sampling_rate {
        let interval = output.sampling_interval();
        output.finish = output.start + count * interval - interval;
    } else if count > 0.0 {
        output.set_sampling_interval((signal.finish - signal.start).abs() / count);
    }
    output
}

/// Arithmetic mean; zero for an empty slice
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation
pub fn standard_deviation(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let m = mean(samples);
    let variance = samples.iter().map(|v| (v - m).powi(2)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}

/// Normal probability density at `x`; zero when `deviation` is zero
pub fn probability_density_function(x: f64, mean: f64, deviation: f64) -> f64 {
    if deviation == 0.0 {
        return 0.0;
    }
    let z = (x - mean) / deviation;
    (-0.5 * z * z).exp() / (deviation * (2.0 * PI).sqrt())
}

/// Density of every sample under the normal fit of the slice, sorted ascending
pub fn normal_distribution(samples: &[f64]) -> Vec<f64> {
    let m = mean(samples);
    let deviation = standard_deviation(samples);
    let mut output: Vec<f64> = samples
        .iter()
        .map(|&x| probability_density_function(x, m, deviation))
        .collect();
    output.sort_by(|a, b| a.total_cmp(b));
    output
}

/// Boolean operation over samples (non-zero is true)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicOperation {
    #[default]
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
    Not,
}

impl LogicOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicOperation::And => "And",
            LogicOperation::Or => "Or",
            LogicOperation::Nand => "Nand",
            LogicOperation::Nor => "Nor",
            LogicOperation::Xor => "Xor",
            LogicOperation::Xnor => "Xnor",
            LogicOperation::Not => "Not",
        }
    }

    #[inline]
    fn apply(&self, a: bool, b: bool) -> bool {
        match self {
            LogicOperation::And => a && b,
            LogicOperation::Or => a || b,
            LogicOperation::Nand => !(a && b),
            LogicOperation::Nor => !(a || b),
            LogicOperation::Xor => a != b,
            LogicOperation::Xnor => a == b,
            LogicOperation::Not => !a,
        }
    }
}

/// Apply a logic operation sample by sample, producing 0/1 values
///
/// The output has the length of `a`; samples missing from `b` read as 0.
pub fn logic(operation: LogicOperation, a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter()
        .enumerate()
        .map(|(i, &x)| {
            let y = b.get(i).copied().unwrap_or(0.0);
            if operation.apply(x != 0.0, y != 0.0) {
                1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// [`logic`] applied to two signals, keeping the metadata of the first
pub fn logic_signal(operation: LogicOperation, a: &Signal, b: &Signal) -> Signal {
    a.with_samples(logic(operation, &a.samples, &b.samples))
}

/// Condition under which [`switch`] takes the sample from B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchCriteria {
    BIsGreaterThanThreshold,
    #[default]
    BIsGreaterOrEqualsThanThreshold,
    BIsLessThanThreshold,
    BIsLessOrEqualsThanThreshold,
}

impl SwitchCriteria {
    #[inline]
    fn holds(&self, b: f64, threshold: f64) -> bool {
        match self {
            SwitchCriteria::BIsGreaterThanThreshold => b > threshold,
            SwitchCriteria::BIsGreaterOrEqualsThanThreshold => b >= threshold,
            SwitchCriteria::BIsLessThanThreshold => b < threshold,
            SwitchCriteria::BIsLessOrEqualsThanThreshold => b <= threshold,
        }
    }
}

/// Select B's sample wherever the criterion holds, A's otherwise
///
/// The output has the length of `a`. A single threshold applies to every
/// sample; otherwise thresholds are per sample with the last value reused.
/// Positions past the end of `b`, or with no threshold at all, keep A.
pub fn switch(a: &[f64], b: &[f64], thresholds: &[f64], criteria: SwitchCriteria) -> Vec<f64> {
    a.iter()
        .enumerate()
        .map(|(i, &x)| {
            let threshold = thresholds.get(i).or_else(|| thresholds.last()).copied();
            match (b.get(i), threshold) {
                (Some(&y), Some(t)) if criteria.holds(y, t) => y,
                _ => x,
            }
        })
        .collect()
}

/// Arithmetic operation between a sample and a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScalarOperation {
    #[default]
    Sum,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl ScalarOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarOperation::Sum => "Sum",
            ScalarOperation::Subtract => "Subtract",
            ScalarOperation::Multiply => "Multiply",
            ScalarOperation::Divide => "Divide",
            ScalarOperation::Power => "Power",
        }
    }

    #[inline]
    pub fn apply(&self, x: f64, value: f64) -> f64 {
        match self {
            ScalarOperation::Sum => x + value,
            ScalarOperation::Subtract => x - value,
            ScalarOperation::Multiply => x * value,
            ScalarOperation::Divide => x / value,
            ScalarOperation::Power => x.powf(value),
        }
    }
}

/// Apply a scalar operation to every sample
pub fn scalar(operation: ScalarOperation, samples: &[f64], value: f64) -> Vec<f64> {
    samples.iter().map(|&x| operation.apply(x, value)).collect()
}

/// Interpolation kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    Nearest,
    Linear,
    /// Catmull-Rom spline with clamped end points
    #[default]
    Cubic,
}

/// Insert `factor - 1` interpolated samples between each pair of samples
///
/// The output holds `(n - 1) * factor + 1` samples and the sampling interval is
/// divided by `factor`. Signals with fewer than two samples, or a factor below
/// 2, are returned unchanged.
pub fn interpolate(signal: &Signal, factor: usize, mode: InterpolationMode) -> Signal {
    let input = &signal.samples;
    let n = input.len();
    if n < 2 || factor < 2 {
        return signal.clone();
    }
    let at = |i: isize| input[i.clamp(0, n as isize - 1) as usize];

    let mut samples = Vec::with_capacity((n - 1) * factor + 1);
    for i in 0..n - 1 {
        let p1 = input[i];
        let p2 = input[i + 1];
        for step in 0..factor {
            let t = step as f64 / factor as f64;
            let value = match mode {
                InterpolationMode::Nearest => {
                    if t < 0.5 {
                        p1
                    } else {
                        p2
                    }
                }
                InterpolationMode::Linear => p1 + (p2 - p1) * t,
                InterpolationMode::Cubic => {
                    let p0 = at(i as isize - 1);
                    let p3 = at(i as isize + 2);
                    let t2 = t * t;
                    let t3 = t2 * t;
                    0.5 * (2.0 * p1
                        + (p2 - p0) * t
                        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
                }
            };
            samples.push(value);
        }
    }
    samples.push(input[n - 1]);

    let mut output = signal.with_samples(samples);
    output.set_sampling_interval(signal.sampling_interval() / factor as f64);
    output
}
