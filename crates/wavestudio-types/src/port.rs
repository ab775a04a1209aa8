//! Port types for block inputs and outputs.

use serde::{Deserialize, Serialize};

/// Direction of a port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        }
    }

    /// The direction a port must have to be wired to this one
    pub fn opposite(&self) -> PortDirection {
        match self {
            PortDirection::Input => PortDirection::Output,
            PortDirection::Output => PortDirection::Input,
        }
    }
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port definition declared by a block kind
///
/// A block kind returns one definition per port; the graph turns them into
/// port instances owned by the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDefinition {
    /// Display name (e.g. "Signal", "Input 2")
    pub name: String,

    /// Short code shown on the port (e.g. "In", "Out")
    pub code: String,

    /// Direction
    pub direction: PortDirection,
}

impl PortDefinition {
    pub fn input(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            direction: PortDirection::Input,
        }
    }

    pub fn output(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            direction: PortDirection::Output,
        }
    }
}

/// Ordered input and output port definitions of a block kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortLayout {
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortDefinition>,
}

impl PortLayout {
    /// Layout with no ports
    pub fn empty() -> Self {
        Self::default()
    }

    /// One "Signal" input and one "Output" output
    pub fn single() -> Self {
        Self::empty()
            .with_input("Signal", "In")
            .with_output("Output", "Out")
    }

    /// Source layout: no inputs, one signal output
    pub fn source() -> Self {
        Self::empty().with_output("Signal", "Out")
    }

    pub fn with_input(mut self, name: &str, code: &str) -> Self {
        self.inputs.push(PortDefinition::input(name, code));
        self
    }

    pub fn with_output(mut self, name: &str, code: &str) -> Self {
        self.outputs.push(PortDefinition::output(name, code));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_direction() {
        assert_eq!(PortDirection::Input.opposite(), PortDirection::Output);
        assert_eq!(PortDirection::Output.opposite(), PortDirection::Input);
    }

    #[test]
    fn test_single_layout() {
        let layout = PortLayout::single();
        assert_eq!(layout.inputs.len(), 1);
        assert_eq!(layout.outputs.len(), 1);
        assert_eq!(layout.inputs[0].direction, PortDirection::Input);
        assert_eq!(layout.outputs[0].code, "Out");
    }

    #[test]
    fn test_source_layout_has_no_inputs() {
        let layout = PortLayout::source();
        assert!(layout.inputs.is_empty());
        assert_eq!(layout.outputs.len(), 1);
    }
}
