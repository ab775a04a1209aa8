//! Port instances owned by blocks

use wavestudio_types::{PortDefinition, PortDirection};

use super::{BlockId, PortId};
use crate::signal::Signal;

/// Input port: refers to the output port it reads from
#[derive(Debug, Clone, PartialEq)]
pub struct InputNode {
    pub name: String,
    pub code: String,
    pub(crate) root: BlockId,
    pub(crate) peer: Option<PortId>,
}

/// Output port: owns the signals last produced by its block
#[derive(Debug, Clone, PartialEq)]
pub struct OutputNode {
    pub name: String,
    pub code: String,
    pub(crate) root: BlockId,
    pub(crate) peer: Option<PortId>,
    pub(crate) signals: Vec<Signal>,
}

impl OutputNode {
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }
}

/// A port stored in the graph arena
#[derive(Debug, Clone, PartialEq)]
pub enum Port {
    Input(InputNode),
    Output(OutputNode),
}

impl Port {
    pub(crate) fn from_definition(def: &PortDefinition, root: BlockId) -> Self {
        let name = def.name.clone();
        let code = def.code.clone();
        match def.direction {
            PortDirection::Input => Port::Input(InputNode {
                name,
                code,
                root,
                peer: None,
            }),
            PortDirection::Output => Port::Output(OutputNode {
                name,
                code,
                root,
                peer: None,
                signals: Vec::new(),
            }),
        }
    }

    pub fn direction(&self) -> PortDirection {
        match self {
            Port::Input(_) => PortDirection::Input,
            Port::Output(_) => PortDirection::Output,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Port::Input(p) => &p.name,
            Port::Output(p) => &p.name,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Port::Input(p) => &p.code,
            Port::Output(p) => &p.code,
        }
    }

    /// Block owning this port
    pub fn root(&self) -> BlockId {
        match self {
            Port::Input(p) => p.root,
            Port::Output(p) => p.root,
        }
    }

    /// Counter-party port, if connected
    pub fn peer(&self) -> Option<PortId> {
        match self {
            Port::Input(p) => p.peer,
            Port::Output(p) => p.peer,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.peer().is_some()
    }

    pub(crate) fn set_peer(&mut self, peer: Option<PortId>) {
        match self {
            Port::Input(p) => p.peer = peer,
            Port::Output(p) => p.peer = peer,
        }
    }

    pub(crate) fn set_root(&mut self, root: BlockId) {
        match self {
            Port::Input(p) => p.root = root,
            Port::Output(p) => p.root = root,
        }
    }

    pub(crate) fn rename(&mut self, def: &PortDefinition) {
        let (name, code) = match self {
            Port::Input(p) => (&mut p.name, &mut p.code),
            Port::Output(p) => (&mut p.name, &mut p.code),
        };
        name.clone_from(&def.name);
        code.clone_from(&def.code);
    }

    /// Signals held by an output port; inputs hold none
    pub fn signals(&self) -> &[Signal] {
        match self {
            Port::Input(_) => &[],
            Port::Output(p) => &p.signals,
        }
    }

    pub fn as_output(&self) -> Option<&OutputNode> {
        match self {
            Port::Output(p) => Some(p),
            Port::Input(_) => None,
        }
    }
}
