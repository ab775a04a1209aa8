//! Block catalog
//!
//! Concrete block kinds. Each kind is a plain parameter struct implementing
//! [`Process`](crate::block::Process); the graph owns the ports.

pub mod import;
pub mod logic;
pub mod mux;
pub mod operations;
pub mod switch;
pub mod transform;

pub use import::{ImportCsv, ImportText};
pub use logic::LogicOperationBlock;
pub use mux::Mux;
pub use operations::{Interpolation, NormalDistribution, Repeat, ScalarOperationBlock, Unique};
pub use switch::Switch;
pub use transform::Dwt;

use crate::block::{Execution, Inputs};
use crate::signal::Signal;

/// Apply `f` to every signal of input 0
///
/// An unconnected input leaves the outputs unchanged; a connected but empty
/// one produces an empty list.
pub(crate) fn map_each(inputs: &Inputs<'_>, f: impl Fn(&Signal) -> Signal) -> Execution {
    match inputs.connected(0) {
        None => Execution::Unchanged,
        Some(signals) => Execution::single(signals.iter().map(f).collect()),
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::block::{Execution, Inputs};
    use crate::signal::Signal;

    /// Parse space separated samples
    pub fn sig(text: &str) -> Signal {
        Signal::new(
            text.split_whitespace()
                .map(|v| v.parse().unwrap())
                .collect(),
        )
    }

    /// Every port connected, in order
    pub fn connected<'a>(ports: &[&'a [Signal]]) -> Inputs<'a> {
        Inputs::new(ports.iter().map(|p| Some(*p)).collect())
    }

    /// Signals written to output `index`
    pub fn output(execution: Execution, index: usize) -> Vec<Signal> {
        match execution {
            Execution::Produced(mut outputs) => outputs.swap_remove(index),
            Execution::Unchanged => panic!("block left its outputs unchanged"),
        }
    }

    pub fn formatted(signals: &[Signal]) -> Vec<String> {
        signals.iter().map(|s| s.format_samples(0, " ")).collect()
    }
}
