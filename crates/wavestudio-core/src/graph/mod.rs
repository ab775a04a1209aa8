//! Block graph
//!
//! Blocks and ports live in per-graph arenas addressed by [`BlockId`] and
//! [`PortId`]. Every port records its own peer, so a link is symmetric only
//! when both ends point at each other; `connect` always creates symmetric
//! links while link-preserving clones create one-way ones.
//!
//! A graph is not meant to be used from several threads at once. Every
//! mutation, including execution, goes through `&mut Graph`; callers that
//! share a graph must serialize access themselves, e.g. with `Mutex<Graph>`.
//!
//! # Example
//!
//! ```ignore
//! let mut graph = Graph::new();
//! let source = graph.add_block(ImportText::new("1 9 0 1").with_delimiter(' '));
//! let repeat = graph.add_block(Repeat::new(4, 1));
//! graph.connect_blocks(source, repeat)?;
//! graph.execute(source)?;
//! let output = graph.output_signals(repeat, 0)?;
//! ```

mod cascade;
mod clone;
mod port;

pub use port::{InputNode, OutputNode, Port};

use std::fmt;

use tracing::debug;
use wavestudio_types::{EngineSettings, GraphSettings, PortDirection, ProcessingType};

use crate::block::Process;
use crate::block_kind::{BlockKind, KindOf};
use crate::error::{Result, WaveError};
use crate::signal::Signal;

/// Opaque block handle, never reused within a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

/// Opaque port handle, never reused within a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(usize);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "port#{}", self.0)
    }
}

/// A block placed in a graph
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    kind: BlockKind,
    inputs: Vec<PortId>,
    outputs: Vec<PortId>,
    cascade: bool,
}

impl Block {
    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn processing_type(&self) -> ProcessingType {
        self.kind.processing_type()
    }

    /// Input ports, in order
    pub fn inputs(&self) -> &[PortId] {
        &self.inputs
    }

    /// Output ports, in order
    pub fn outputs(&self) -> &[PortId] {
        &self.outputs
    }

    /// Whether execution propagates to downstream blocks
    pub fn cascade(&self) -> bool {
        self.cascade
    }
}

/// Arena of blocks and ports
///
/// Not synchronized: share it between threads only behind a lock such as
/// `Mutex<Graph>`.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    blocks: Vec<Option<Block>>,
    ports: Vec<Option<Port>>,
    settings: GraphSettings,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: GraphSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Graph configured from the graph section of engine settings
    pub fn from_engine_settings(settings: &EngineSettings) -> Self {
        Self::with_settings(settings.graph.clone())
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Add a block; its ports are created from the kind's layout
    pub fn add_block(&mut self, kind: impl Into<BlockKind>) -> BlockId {
        let id = self.insert_block(kind.into(), true);
        let layout = self.blocks[id.0].as_ref().map(|b| b.kind.ports());
        if let Some(layout) = layout {
            for def in layout.inputs.iter().chain(&layout.outputs) {
                self.attach_port(id, Port::from_definition(def, id));
            }
        }
        debug!(block = %id, "added block");
        id
    }

    /// Remove a block, disconnecting every link that touches its ports
    pub fn remove_block(&mut self, id: BlockId) -> Result<BlockKind> {
        let block = self
            .blocks
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(WaveError::UnknownBlock(id))?;
        let removed: Vec<PortId> = block.inputs.iter().chain(&block.outputs).copied().collect();
        for port in &removed {
            self.ports[port.0] = None;
        }
        for port in self.ports.iter_mut().flatten() {
            if port.peer().is_some_and(|p| removed.contains(&p)) {
                port.set_peer(None);
            }
        }
        debug!(block = %id, "removed block");
        Ok(block.kind)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.block(id).is_ok()
    }

    pub fn block(&self, id: BlockId) -> Result<&Block> {
        self.blocks
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(WaveError::UnknownBlock(id))
    }

    fn block_mut(&mut self, id: BlockId) -> Result<&mut Block> {
        self.blocks
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(WaveError::UnknownBlock(id))
    }

    /// Ids of all live blocks, insertion order
    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_some())
            .map(|(i, _)| BlockId(i))
    }

    pub fn len(&self) -> usize {
        self.blocks.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typed view of a block's parameters
    pub fn kind<T: KindOf>(&self, id: BlockId) -> Result<&T> {
        let kind = &self.block(id)?.kind;
        T::from_kind(kind).ok_or(WaveError::KindMismatch {
            expected: T::VARIANT,
            found: kind.variant_name(),
        })
    }

    /// Change a block's parameters
    ///
    /// Ports are rebuilt from the new layout: ports that still exist keep
    /// their connections and signals, surplus ports are disconnected and
    /// dropped, and missing ones are added unconnected.
    pub fn configure<T: KindOf>(&mut self, id: BlockId, f: impl FnOnce(&mut T)) -> Result<()> {
        let block = self.block_mut(id)?;
        let found = block.kind.variant_name();
        let params = T::from_kind_mut(&mut block.kind).ok_or(WaveError::KindMismatch {
            expected: T::VARIANT,
            found,
        })?;
        f(params);
        self.rebuild_ports(id)
    }

    pub fn set_cascade(&mut self, id: BlockId, cascade: bool) -> Result<()> {
        self.block_mut(id)?.cascade = cascade;
        Ok(())
    }

    pub fn port(&self, id: PortId) -> Result<&Port> {
        self.ports
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(WaveError::UnknownPort(id))
    }

    fn port_mut(&mut self, id: PortId) -> Result<&mut Port> {
        self.ports
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(WaveError::UnknownPort(id))
    }

    pub fn input_port(&self, block: BlockId, index: usize) -> Result<PortId> {
        let b = self.block(block)?;
        b.inputs.get(index).copied().ok_or_else(|| {
            WaveError::InvalidParameter(format!("{block} has no input port {index}"))
        })
    }

    pub fn output_port(&self, block: BlockId, index: usize) -> Result<PortId> {
        let b = self.block(block)?;
        b.outputs.get(index).copied().ok_or_else(|| {
            WaveError::InvalidParameter(format!("{block} has no output port {index}"))
        })
    }

    /// Signals currently held by output `index` of `block`
    pub fn output_signals(&self, block: BlockId, index: usize) -> Result<&[Signal]> {
        let port = self.output_port(block, index)?;
        Ok(self.port(port)?.signals())
    }

    pub fn peer(&self, port: PortId) -> Result<Option<PortId>> {
        Ok(self.port(port)?.peer())
    }

    pub fn is_connected(&self, port: PortId) -> Result<bool> {
        Ok(self.port(port)?.is_connected())
    }

    /// Link two ports of opposite direction
    ///
    /// Any previous peer of either port is released first, so no half-link
    /// to a displaced port remains. Connecting never executes anything.
    pub fn connect(&mut self, a: PortId, b: PortId) -> Result<()> {
        let direction_a = self.port(a)?.direction();
        let direction_b = self.port(b)?.direction();
        if direction_a == direction_b {
            return Err(WaveError::SameDirection(direction_a));
        }
        for (port, other) in [(a, b), (b, a)] {
            if let Some(old) = self.port(port)?.peer() {
                if old != other {
                    self.release(old, port);
                }
            }
        }
        self.port_mut(a)?.set_peer(Some(b));
        self.port_mut(b)?.set_peer(Some(a));
        debug!(from = %a, to = %b, "connected ports");
        Ok(())
    }

    /// Clear a port's peer, and the peer's back-link when it points here
    pub fn disconnect(&mut self, port: PortId) -> Result<()> {
        let Some(peer) = self.port(port)?.peer() else {
            return Ok(());
        };
        self.port_mut(port)?.set_peer(None);
        self.release(peer, port);
        Ok(())
    }

    /// Wire the first free output of `from` to the first free input of `to`
    ///
    /// Falls back to the first port when all are taken; does nothing when
    /// either block lacks ports of the needed direction.
    pub fn connect_blocks(&mut self, from: BlockId, to: BlockId) -> Result<()> {
        let output = self.first_free(&self.block(from)?.outputs)?;
        let input = self.first_free(&self.block(to)?.inputs)?;
        match (output, input) {
            (Some(output), Some(input)) => self.connect(output, input),
            _ => Ok(()),
        }
    }

    fn first_free(&self, ports: &[PortId]) -> Result<Option<PortId>> {
        for &id in ports {
            if !self.port(id)?.is_connected() {
                return Ok(Some(id));
            }
        }
        Ok(ports.first().copied())
    }

    /// Clear `port`'s peer if it points at `from`
    fn release(&mut self, port: PortId, from: PortId) {
        if let Ok(p) = self.port_mut(port) {
            if p.peer() == Some(from) {
                p.set_peer(None);
            }
        }
    }

    fn insert_block(&mut self, kind: BlockKind, cascade: bool) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(Some(Block {
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
            cascade,
        }));
        id
    }

    /// Store a port and register it with its block
    fn attach_port(&mut self, block: BlockId, mut port: Port) -> PortId {
        let id = PortId(self.ports.len());
        port.set_root(block);
        let direction = port.direction();
        self.ports.push(Some(port));
        if let Some(b) = self.blocks.get_mut(block.0).and_then(Option::as_mut) {
            match direction {
                PortDirection::Input => b.inputs.push(id),
                PortDirection::Output => b.outputs.push(id),
            }
        }
        id
    }

    fn drop_port(&mut self, id: PortId) -> Result<()> {
        self.disconnect(id)?;
        self.ports[id.0] = None;
        for port in self.ports.iter_mut().flatten() {
            if port.peer() == Some(id) {
                port.set_peer(None);
            }
        }
        Ok(())
    }

    fn rebuild_ports(&mut self, id: BlockId) -> Result<()> {
        let block = self.block(id)?;
        let layout = block.kind.ports();
        let inputs = block.inputs.clone();
        let outputs = block.outputs.clone();

        for (existing, defs) in [(inputs, &layout.inputs), (outputs, &layout.outputs)] {
            for (index, &port) in existing.iter().enumerate() {
                match defs.get(index) {
                    Some(def) => self.port_mut(port)?.rename(def),
                    None => self.drop_port(port)?,
                }
            }
            for def in defs.iter().skip(existing.len()) {
                self.attach_port(id, Port::from_definition(def, id));
            }
        }

        let block = self.block_mut(id)?;
        block.inputs.truncate(layout.inputs.len());
        block.outputs.truncate(layout.outputs.len());
        debug!(
            block = %id,
            inputs = layout.inputs.len(),
            outputs = layout.outputs.len(),
            "rebuilt ports"
        );
        Ok(())
    }
}
