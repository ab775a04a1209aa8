//! Execution and push-based cascading
//!
//! Cascading walks an explicit stack instead of recursing. `Enter` frames run
//! a block and schedule its downstream blocks; the matching `Leave` frame takes
//! it off the active path once everything below it has run. A block already on
//! the active path is not entered again, which keeps cycles finite.

use std::collections::HashSet;

use tracing::{debug, trace};
use wavestudio_types::PortDirection;

use super::{BlockId, Graph, Port};
use crate::block::{Execution, Inputs, Process};
use crate::error::{Result, WaveError};

#[derive(Debug, Clone, Copy)]
enum Frame {
    Enter { block: BlockId, depth: usize },
    Leave(BlockId),
}

impl Graph {
    /// Execute a block and, while cascading is enabled, everything it feeds
    ///
    /// Downstream blocks run depth-first in output port order. An error
    /// aborts the remaining cascade; outputs produced before it stay.
    pub fn execute(&mut self, id: BlockId) -> Result<()> {
        self.block(id)?;
        let max_depth = self.settings.max_cascade_depth;
        let mut active = HashSet::new();
        let mut stack = vec![Frame::Enter { block: id, depth: 0 }];

        while let Some(frame) = stack.pop() {
            let (block, depth) = match frame {
                Frame::Leave(block) => {
                    active.remove(&block);
                    continue;
                }
                Frame::Enter { block, depth } => (block, depth),
            };
            if active.contains(&block) {
                trace!(block = %block, "already on the cascade path, skipping");
                continue;
            }
            if max_depth.is_some_and(|max| depth > max) {
                trace!(block = %block, depth, "cascade depth limit reached");
                continue;
            }

            active.insert(block);
            stack.push(Frame::Leave(block));

            if !self.execute_once(block)? {
                continue;
            }
            let downstream = self.downstream(block)?;
            for next in downstream.into_iter().rev() {
                stack.push(Frame::Enter {
                    block: next,
                    depth: depth + 1,
                });
            }
        }
        Ok(())
    }

    /// Run a single block without cascading
    ///
    /// Returns whether the block produced fresh outputs.
    pub(crate) fn execute_once(&mut self, id: BlockId) -> Result<bool> {
        let block = self.block(id)?;
        let execution = {
            let mut ports = Vec::with_capacity(block.inputs.len());
            for &input in &block.inputs {
                let source = self
                    .port(input)?
                    .peer()
                    .and_then(|peer| self.port(peer).ok())
                    .and_then(Port::as_output)
                    .map(|output| output.signals());
                ports.push(source);
            }
            block.kind.execute(&Inputs::new(ports))?
        };

        let Execution::Produced(lists) = execution else {
            debug!(block = %id, "block left its outputs unchanged");
            return Ok(false);
        };

        let outputs = block.outputs.clone();
        let mut lists = lists.into_iter();
        for port in outputs {
            let signals = lists.next().unwrap_or_default();
            match self.port_mut(port)? {
                Port::Output(output) => output.signals = signals,
                Port::Input(_) => {
                    return Err(WaveError::PortDirection {
                        port,
                        expected: PortDirection::Output,
                        found: PortDirection::Input,
                    })
                }
            }
        }
        debug!(block = %id, "executed block");
        Ok(true)
    }

    /// Owners of the input ports fed by a cascading block, in output order
    fn downstream(&self, id: BlockId) -> Result<Vec<BlockId>> {
        let block = self.block(id)?;
        if !block.cascade {
            trace!(block = %id, "cascade disabled");
            return Ok(Vec::new());
        }
        let mut next = Vec::new();
        for &output in &block.outputs {
            if let Some(peer) = self.port(output)?.peer() {
                if let Ok(port) = self.port(peer) {
                    next.push(port.root());
                }
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{ImportText, Mux, Repeat, ScalarOperationBlock};
    use crate::math::ScalarOperation;
    use wavestudio_types::GraphSettings;

    fn values(graph: &Graph, block: BlockId) -> Vec<Vec<f64>> {
        graph
            .output_signals(block, 0)
            .unwrap()
            .iter()
            .map(|s| s.samples.clone())
            .collect()
    }

    #[test]
    fn test_execute_cascades_down_chain() {
        let mut graph = Graph::new();
        let source = graph.add_block(ImportText::new("1 2").with_delimiter(' '));
        let add = graph.add_block(ScalarOperationBlock::new(ScalarOperation::Sum, 1.0));
        let mul = graph.add_block(ScalarOperationBlock::new(ScalarOperation::Multiply, 10.0));
        graph.connect_blocks(source, add).unwrap();
        graph.connect_blocks(add, mul).unwrap();

        graph.execute(source).unwrap();
        assert_eq!(values(&graph, add), vec![vec![2.0, 3.0]]);
        assert_eq!(values(&graph, mul), vec![vec![20.0, 30.0]]);
    }

    #[test]
    fn test_cascade_disabled_keeps_downstream_stale() {
        let mut graph = Graph::new();
        let source = graph.add_block(ImportText::new("1 2").with_delimiter(' '));
        let repeat = graph.add_block(Repeat::new(2, 1));
        graph.connect_blocks(source, repeat).unwrap();
        graph.execute(source).unwrap();
        assert_eq!(values(&graph, repeat), vec![vec![1.0, 2.0, 1.0, 2.0]]);

        graph.set_cascade(source, false).unwrap();
        graph
            .configure::<ImportText>(source, |b| b.set_text("7"))
            .unwrap();
        graph.execute(source).unwrap();
        assert_eq!(values(&graph, source), vec![vec![7.0]]);
        assert_eq!(values(&graph, repeat), vec![vec![1.0, 2.0, 1.0, 2.0]]);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = Graph::new();
        let source = graph.add_block(ImportText::new("1").with_delimiter(' '));
        let mux = graph.add_block(Mux::new(2));
        let add = graph.add_block(ScalarOperationBlock::new(ScalarOperation::Sum, 1.0));
        graph.connect_blocks(source, mux).unwrap();
        graph.connect_blocks(mux, add).unwrap();
        let loop_back = graph.input_port(mux, 1).unwrap();
        let add_out = graph.output_port(add, 0).unwrap();
        graph.connect(add_out, loop_back).unwrap();

        graph.execute(source).unwrap();
        assert_eq!(values(&graph, mux), vec![vec![1.0]]);
        assert_eq!(values(&graph, add), vec![vec![2.0]]);
    }

    #[test]
    fn test_max_depth_bounds_propagation() {
        let settings = GraphSettings {
            max_cascade_depth: Some(1),
        };
        let mut graph = Graph::with_settings(settings);
        let source = graph.add_block(ImportText::new("1").with_delimiter(' '));
        let first = graph.add_block(ScalarOperationBlock::new(ScalarOperation::Sum, 1.0));
        let second = graph.add_block(ScalarOperationBlock::new(ScalarOperation::Sum, 1.0));
        graph.connect_blocks(source, first).unwrap();
        graph.connect_blocks(first, second).unwrap();

        graph.execute(source).unwrap();
        assert_eq!(values(&graph, first), vec![vec![2.0]]);
        assert!(graph.output_signals(second, 0).unwrap().is_empty());
    }

    #[test]
    fn test_unconnected_block_leaves_outputs() {
        let mut graph = Graph::new();
        let repeat = graph.add_block(Repeat::default());
        graph.execute(repeat).unwrap();
        assert!(graph.output_signals(repeat, 0).unwrap().is_empty());
    }

    #[test]
    fn test_error_aborts_cascade() {
        let mut graph = Graph::new();
        let source = graph.add_block(ImportText::new("1 2 3 4").with_delimiter(' '));
        let dwt = graph.add_block(crate::blocks::Dwt::new("nope", 1));
        graph.connect_blocks(source, dwt).unwrap();

        assert!(matches!(
            graph.execute(source),
            Err(WaveError::UnknownWavelet(_))
        ));
        assert_eq!(values(&graph, source), vec![vec![1.0, 2.0, 3.0, 4.0]]);
    }

    #[test]
    fn test_unknown_block() {
        let mut graph = Graph::new();
        let id = graph.add_block(Repeat::default());
        graph.remove_block(id).unwrap();
        assert!(matches!(
            graph.execute(id),
            Err(WaveError::UnknownBlock(_))
        ));
    }
}
