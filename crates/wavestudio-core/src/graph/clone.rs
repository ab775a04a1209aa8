//! Block cloning
//!
//! Both clones get a fresh [`BlockId`] and run once without cascading. If
//! that execution fails the clone is removed again and the error returned.

use tracing::{debug, warn};

use super::{BlockId, Graph, Port};
use crate::block::Process;
use crate::error::Result;

impl Graph {
    /// Copy a block's parameters and cascade flag onto fresh, unconnected ports
    pub fn clone_block(&mut self, id: BlockId) -> Result<BlockId> {
        let source = self.block(id)?;
        let kind = source.kind.clone();
        let cascade = source.cascade;
        let layout = kind.ports();

        let clone = self.insert_block(kind, cascade);
        for def in layout.inputs.iter().chain(&layout.outputs) {
            self.attach_port(clone, Port::from_definition(def, clone));
        }
        debug!(source = %id, clone = %clone, "cloned block");
        self.settle_clone(clone)
    }

    /// Copy a block together with every port's peer
    ///
    /// The clone's ports point at the same counter-parties as the original's,
    /// but those counter-parties keep pointing at the original. Output ports
    /// start from a copy of the original's signals.
    pub fn clone_with_links(&mut self, id: BlockId) -> Result<BlockId> {
        let source = self.block(id)?;
        let kind = source.kind.clone();
        let cascade = source.cascade;
        let mut ports = Vec::with_capacity(source.inputs.len() + source.outputs.len());
        for &port in source.inputs.iter().chain(&source.outputs) {
            ports.push(self.port(port)?.clone());
        }

        let clone = self.insert_block(kind, cascade);
        for port in ports {
            self.attach_port(clone, port);
        }
        debug!(source = %id, clone = %clone, "cloned block with links");
        self.settle_clone(clone)
    }

    fn settle_clone(&mut self, clone: BlockId) -> Result<BlockId> {
        match self.execute_once(clone) {
            Ok(_) => Ok(clone),
            Err(err) => {
                warn!(clone = %clone, error = %err, "clone failed to execute, discarding it");
                self.remove_block(clone)?;
                Err(err)
            }
        }
    }
}
