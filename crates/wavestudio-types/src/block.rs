//! Block category definitions.

use serde::{Deserialize, Serialize};

/// Type of action performed by a block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingType {
    /// The block loads an external signal
    LoadSignal,
    /// The block creates a signal
    CreateSignal,
    /// The block operates on the samples of a signal
    Operation,
    /// Logic operations
    Logic,
    /// The block inserts disturbances or noise into the signal
    InsertDisturbance,
    /// The block exports the signal
    Export,
    /// The block applies a transform to the signal
    Transform,
    /// Signal routing
    Routing,
}

impl ProcessingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingType::LoadSignal => "LoadSignal",
            ProcessingType::CreateSignal => "CreateSignal",
            ProcessingType::Operation => "Operation",
            ProcessingType::Logic => "Logic",
            ProcessingType::InsertDisturbance => "InsertDisturbance",
            ProcessingType::Export => "Export",
            ProcessingType::Transform => "Transform",
            ProcessingType::Routing => "Routing",
        }
    }

    /// True for categories whose blocks produce data without any input port
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            ProcessingType::LoadSignal | ProcessingType::CreateSignal
        )
    }
}

impl std::fmt::Display for ProcessingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
