//! Multiplexer block

use wavestudio_types::{PortLayout, ProcessingType};

use crate::block::{Execution, Inputs, Process};
use crate::error::Result;

/// Concatenates the signal lists of all inputs
///
/// Changing the input count changes the port layout; the graph rebuilds the
/// ports when the block is reconfigured through `Graph::configure`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mux {
    input_count: usize,
    /// One name per line, applied in output order
    signal_names: String,
}

impl Default for Mux {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Mux {
    pub fn new(input_count: usize) -> Self {
        Self {
            input_count,
            signal_names: String::new(),
        }
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn set_input_count(&mut self, count: usize) {
        self.input_count = count;
    }

    pub fn signal_names(&self) -> &str {
        &self.signal_names
    }

    pub fn set_signal_names(&mut self, names: impl Into<String>) {
        self.signal_names = names.into();
    }
}

impl Process for Mux {
    fn name(&self) -> &'static str {
        "Mux"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Routing
    }

    fn ports(&self) -> PortLayout {
        (1..=self.input_count)
            .fold(PortLayout::empty(), |layout, i| {
                layout.with_input(&format!("Input {i}"), &format!("In{i}"))
            })
            .with_output("Output", "Out")
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        let mut names = self.signal_names.lines().filter(|l| !l.is_empty());
        let output = inputs
            .iter()
            .flatten()
            .map(|signal| {
                let mut signal = signal.clone();
                if let Some(name) = names.next() {
                    signal.name = name.to_string();
                }
                signal
            })
            .collect();
        Ok(Execution::single(output))
    }
}
