//! Sample-based operation blocks (one input, one output)

use wavestudio_types::{PortLayout, ProcessingType};

use super::map_each;
use crate::block::{Execution, Inputs, Process};
use crate::error::Result;
use crate::math::{
    interpolate, normal_distribution, repeat_signal, scalar, unique, unique_sorted,
    InterpolationMode, ScalarOperation,
};

/// Repeats frames of samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repeat {
    frame_size: usize,
    repetition_count: usize,
    keep_sampling_rate: bool,
}

impl Default for Repeat {
    fn default() -> Self {
        Self {
            frame_size: 1,
            repetition_count: 1,
            keep_sampling_rate: true,
        }
    }
}

impl Repeat {
    pub fn new(frame_size: usize, repetition_count: usize) -> Self {
        Self {
            frame_size,
            repetition_count,
            ..Default::default()
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn set_frame_size(&mut self, frame_size: usize) {
        self.frame_size = frame_size;
    }

    pub fn repetition_count(&self) -> usize {
        self.repetition_count
    }

    pub fn set_repetition_count(&mut self, repetition_count: usize) {
        self.repetition_count = repetition_count;
    }

    pub fn keep_sampling_rate(&self) -> bool {
        self.keep_sampling_rate
    }

    pub fn set_keep_sampling_rate(&mut self, keep: bool) {
        self.keep_sampling_rate = keep;
    }
}

impl Process for Repeat {
    fn name(&self) -> &'static str {
        "Repeat"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Operation
    }

    fn ports(&self) -> PortLayout {
        PortLayout::single()
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        Ok(map_each(inputs, |signal| {
            repeat_signal(
                signal,
                self.frame_size,
                self.repetition_count,
                self.keep_sampling_rate,
            )
        }))
    }
}

/// Removes repeated samples, sorting them unless told otherwise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unique {
    sort_samples: bool,
}

impl Default for Unique {
    fn default() -> Self {
        Self { sort_samples: true }
    }
}

impl Unique {
    pub fn new(sort_samples: bool) -> Self {
        Self { sort_samples }
    }

    pub fn sort_samples(&self) -> bool {
        self.sort_samples
    }

    pub fn set_sort_samples(&mut self, sort: bool) {
        self.sort_samples = sort;
    }
}

impl Process for Unique {
    fn name(&self) -> &'static str {
        "Unique"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Operation
    }

    fn ports(&self) -> PortLayout {
        PortLayout::single()
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        Ok(map_each(inputs, |signal| {
            let samples = if self.sort_samples {
                unique_sorted(&signal.samples)
            } else {
                unique(&signal.samples)
            };
            signal.with_samples(samples)
        }))
    }
}

/// Resamples by inserting interpolated values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolation {
    factor: usize,
    mode: InterpolationMode,
}

impl Default for Interpolation {
    fn default() -> Self {
        Self {
            factor: 5,
            mode: InterpolationMode::Cubic,
        }
    }
}

impl Interpolation {
    pub fn new(factor: usize, mode: InterpolationMode) -> Self {
        Self { factor, mode }
    }

    pub fn factor(&self) -> usize {
        self.factor
    }

    pub fn set_factor(&mut self, factor: usize) {
        self.factor = factor;
    }

    pub fn mode(&self) -> InterpolationMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InterpolationMode) {
        self.mode = mode;
    }
}

impl Process for Interpolation {
    fn name(&self) -> &'static str {
        "Interpolate"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Operation
    }

    fn ports(&self) -> PortLayout {
        PortLayout::single()
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        Ok(map_each(inputs, |signal| {
            interpolate(signal, self.factor, self.mode)
        }))
    }
}

/// Normal density of every sample, sorted ascending
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalDistribution;

impl NormalDistribution {
    pub fn new() -> Self {
        Self
    }
}

impl Process for NormalDistribution {
    fn name(&self) -> &'static str {
        "Normal"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Operation
    }

    fn ports(&self) -> PortLayout {
        PortLayout::single()
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        Ok(map_each(inputs, |signal| {
            signal.with_samples(normal_distribution(&signal.samples))
        }))
    }
}

/// Arithmetic between every sample and a constant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScalarOperationBlock {
    operation: ScalarOperation,
    value: f64,
}

impl ScalarOperationBlock {
    pub fn new(operation: ScalarOperation, value: f64) -> Self {
        Self { operation, value }
    }

    pub fn operation(&self) -> ScalarOperation {
        self.operation
    }

    pub fn set_operation(&mut self, operation: ScalarOperation) {
        self.operation = operation;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

impl Process for ScalarOperationBlock {
    fn name(&self) -> &'static str {
        self.operation.as_str()
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Operation
    }

    fn ports(&self) -> PortLayout {
        PortLayout::single()
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        Ok(map_each(inputs, |signal| {
            signal.with_samples(scalar(self.operation, &signal.samples, self.value))
        }))
    }
}
