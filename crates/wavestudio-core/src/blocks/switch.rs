//! Switch block

use wavestudio_types::{PortLayout, ProcessingType};

use crate::block::{Execution, Inputs, Process};
use crate::error::Result;
use crate::math::{switch, SwitchCriteria};
use crate::signal::Signal;

/// Routes samples from A or B depending on a threshold test on B
///
/// Inputs: A, an optional threshold signal, B. Without threshold data the
/// static threshold applies. When only one of A and B has signals they are
/// passed through; signals beyond the shorter list are passed through too.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Switch {
    criteria: SwitchCriteria,
    static_threshold: f64,
}

impl Switch {
    pub fn new(criteria: SwitchCriteria, static_threshold: f64) -> Self {
        Self {
            criteria,
            static_threshold,
        }
    }

    pub fn criteria(&self) -> SwitchCriteria {
        self.criteria
    }

    pub fn set_criteria(&mut self, criteria: SwitchCriteria) {
        self.criteria = criteria;
    }

    pub fn static_threshold(&self) -> f64 {
        self.static_threshold
    }

    pub fn set_static_threshold(&mut self, threshold: f64) {
        self.static_threshold = threshold;
    }

    fn thresholds<'a>(&'a self, signals: &'a [Signal], index: usize) -> &'a [f64] {
        match signals.get(index) {
            Some(signal) => &signal.samples,
            None if signals.len() == 1 => &signals[0].samples,
            None => std::slice::from_ref(&self.static_threshold),
        }
    }
}

impl Process for Switch {
    fn name(&self) -> &'static str {
        "Switch"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Routing
    }

    fn ports(&self) -> PortLayout {
        PortLayout::empty()
            .with_input("Input 1", "In1")
            .with_input("Input 2", "In2")
            .with_input("Input 3", "In3")
            .with_output("Output", "Out")
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        let a = inputs.signals(0);
        let thresholds = inputs.signals(1);
        let b = inputs.signals(2);

        if a.is_empty() || b.is_empty() {
            return Ok(Execution::single(a.iter().chain(b).cloned().collect()));
        }

        let size = a.len().max(b.len());
        let output = (0..size)
            .filter_map(|i| match (a.get(i), b.get(i)) {
                (Some(x), Some(y)) => {
                    let t = self.thresholds(thresholds, i);
                    Some(x.with_samples(switch(&x.samples, &y.samples, t, self.criteria)))
                }
                (Some(x), None) => Some(x.clone()),
                (None, Some(y)) => Some(y.clone()),
                (None, None) => None,
            })
            .collect();
        Ok(Execution::single(output))
    }
}
