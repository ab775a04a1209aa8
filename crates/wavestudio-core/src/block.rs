//! Core block trait
//!
//! Every block kind implements [`Process`]. A block never touches the graph
//! directly: the graph hands it a read-only view of the signals sitting on the
//! output ports its inputs are wired to, and writes whatever the block
//! produces into the block's own output ports.

use wavestudio_types::{PortLayout, ProcessingType};

use crate::error::Result;
use crate::signal::Signal;

/// Signals visible on a block's input ports
///
/// `None` marks an unconnected input; `Some(&[])` a connected input whose
/// upstream output holds no signals.
#[derive(Debug, Clone, Default)]
pub struct Inputs<'a> {
    ports: Vec<Option<&'a [Signal]>>,
}

impl<'a> Inputs<'a> {
    pub fn new(ports: Vec<Option<&'a [Signal]>>) -> Self {
        Self { ports }
    }

    /// No input ports at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Signals of input `index`, or `None` when the port is unconnected or missing
    pub fn connected(&self, index: usize) -> Option<&'a [Signal]> {
        self.ports.get(index).copied().flatten()
    }

    /// Signals of input `index`; unconnected reads as empty
    pub fn signals(&self, index: usize) -> &'a [Signal] {
        self.connected(index).unwrap_or(&[])
    }

    /// True when input `index` carries at least one signal
    pub fn has_data(&self, index: usize) -> bool {
        !self.signals(index).is_empty()
    }

    /// Signals of every input, port order
    pub fn iter(&self) -> impl Iterator<Item = &'a [Signal]> + '_ {
        self.ports.iter().map(|p| p.unwrap_or(&[]))
    }
}

/// Outcome of one block execution
#[derive(Debug, Clone, PartialEq)]
pub enum Execution {
    /// Outputs left as they were; nothing propagates downstream
    Unchanged,
    /// Fresh signal list per output port, port order
    Produced(Vec<Vec<Signal>>),
}

impl Execution {
    /// Single-output result
    pub fn single(signals: Vec<Signal>) -> Self {
        Execution::Produced(vec![signals])
    }

    pub fn is_produced(&self) -> bool {
        matches!(self, Execution::Produced(_))
    }
}

/// Processing unit contract shared by every block kind
pub trait Process {
    /// Display name
    fn name(&self) -> &'static str;

    /// Category of the action performed
    fn processing_type(&self) -> ProcessingType;

    /// Ports the kind needs, given its current parameters
    fn ports(&self) -> PortLayout;

    /// Compute output signals from the current inputs
    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_view() {
        let signals = vec![Signal::new(vec![1.0])];
        let inputs = Inputs::new(vec![Some(&signals[..]), Some(&[][..]), None]);
        assert_eq!(inputs.len(), 3);
        assert!(inputs.has_data(0));
        assert!(inputs.connected(1).is_some());
        assert!(!inputs.has_data(1));
        assert!(inputs.connected(2).is_none());
        assert!(inputs.signals(7).is_empty());
        assert_eq!(inputs.iter().filter(|s| !s.is_empty()).count(), 1);
    }
}
