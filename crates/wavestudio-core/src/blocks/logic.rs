//! Logic operation block

use wavestudio_types::{PortLayout, ProcessingType};

use crate::block::{Execution, Inputs, Process};
use crate::error::Result;
use crate::math::{logic_signal, LogicOperation};

/// Pairwise boolean operation between two signal lists
///
/// Signal `i` of the longer list is combined with signal `i` of the other
/// list, or with its first signal when the other list is shorter. `Not`
/// ignores the second operand but still needs input 2 wired.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogicOperationBlock {
    operation: LogicOperation,
}

impl LogicOperationBlock {
    pub fn new(operation: LogicOperation) -> Self {
        Self { operation }
    }

    pub fn operation(&self) -> LogicOperation {
        self.operation
    }

    pub fn set_operation(&mut self, operation: LogicOperation) {
        self.operation = operation;
    }
}

impl Process for LogicOperationBlock {
    fn name(&self) -> &'static str {
        self.operation.as_str()
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::Logic
    }

    fn ports(&self) -> PortLayout {
        PortLayout::empty()
            .with_input("Input 1", "In1")
            .with_input("Input 2", "In2")
            .with_output("Output", "Out")
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        let (Some(mut first), Some(mut second)) = (inputs.connected(0), inputs.connected(1))
        else {
            return Ok(Execution::Unchanged);
        };
        if first.is_empty() {
            return Ok(Execution::Unchanged);
        }
        if second.len() > first.len() {
            std::mem::swap(&mut first, &mut second);
        }

        let output = first
            .iter()
            .enumerate()
            .map(|(i, a)| match second.get(i).or_else(|| second.first()) {
                Some(b) => logic_signal(self.operation, a, b),
                None => a.clone(),
            })
            .collect();
        Ok(Execution::single(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::test_utils::{connected, formatted, output, sig};
    use crate::signal::Signal;

    #[test]
    fn test_and_operation() {
        let a = [sig("0 15 -1 1 0 -15 1")];
        let b = [sig("0 -1 11 0 1 0 1")];
        let block = LogicOperationBlock::default();
        let signals = output(block.execute(&connected(&[&a[..], &b[..]])).unwrap(), 0);
        assert_eq!(formatted(&signals), vec!["0 1 1 0 0 0 1"]);
    }

    #[test]
    fn test_shorter_second_list_reuses_first_signal() {
        let a = [sig("1 0"), sig("0 0")];
        let b = [sig("1 1")];
        let block = LogicOperationBlock::new(LogicOperation::Or);
        let signals = output(block.execute(&connected(&[&a[..], &b[..]])).unwrap(), 0);
        assert_eq!(formatted(&signals), vec!["1 1", "1 1"]);
    }

    #[test]
    fn test_longer_second_list_swaps_operands() {
        let a = [sig("1 1 1")];
        let b = [sig("0 1"), sig("1 1")];
        let block = LogicOperationBlock::new(LogicOperation::And);
        let signals = output(block.execute(&connected(&[&a[..], &b[..]])).unwrap(), 0);
        assert_eq!(formatted(&signals), vec!["0 1", "1 1"]);
    }

    #[test]
    fn test_empty_second_list_passes_through() {
        let a = [sig("3 0")];
        let empty: [Signal; 0] = [];
        let block = LogicOperationBlock::new(LogicOperation::Xor);
        let signals = output(block.execute(&connected(&[&a[..], &empty[..]])).unwrap(), 0);
        assert_eq!(formatted(&signals), vec!["3 0"]);
    }

    #[test]
    fn test_missing_inputs_unchanged() {
        let a = [sig("1")];
        let block = LogicOperationBlock::new(LogicOperation::Not);
        let only_first = Inputs::new(vec![Some(&a[..]), None]);
        assert_eq!(block.execute(&only_first).unwrap(), Execution::Unchanged);
        let empty: [Signal; 0] = [];
        let empty_first = connected(&[&empty[..], &a[..]]);
        assert_eq!(block.execute(&empty_first).unwrap(), Execution::Unchanged);
        assert_eq!(block.name(), "Not");
    }
}
