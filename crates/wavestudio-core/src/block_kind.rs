//! BlockKind enum for dispatch over the block catalog
//!
//! The graph stores every block as a [`BlockKind`]. Calls go through a
//! `match` on the variant instead of a trait object, and [`KindOf`] gives
//! typed access back to the concrete parameter struct.

use wavestudio_types::{PortLayout, ProcessingType};

use crate::block::{Execution, Inputs, Process};
use crate::blocks::*;
use crate::error::Result;

/// Macro to reduce boilerplate for Process trait method delegation
macro_rules! dispatch_method {
    ($self:ident, $method:ident $(, $args:expr)*) => {
        match $self {
            BlockKind::ImportCsv(b) => b.$method($($args),*),
            BlockKind::ImportText(b) => b.$method($($args),*),
            BlockKind::Repeat(b) => b.$method($($args),*),
            BlockKind::Unique(b) => b.$method($($args),*),
            BlockKind::Interpolation(b) => b.$method($($args),*),
            BlockKind::NormalDistribution(b) => b.$method($($args),*),
            BlockKind::ScalarOperation(b) => b.$method($($args),*),
            BlockKind::LogicOperation(b) => b.$method($($args),*),
            BlockKind::Mux(b) => b.$method($($args),*),
            BlockKind::Switch(b) => b.$method($($args),*),
            BlockKind::Dwt(b) => b.$method($($args),*),
        }
    };
}

/// Every block kind of the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    // Sources
    ImportCsv(ImportCsv),
    ImportText(ImportText),

    // Sample operations
    Repeat(Repeat),
    Unique(Unique),
    Interpolation(Interpolation),
    NormalDistribution(NormalDistribution),
    ScalarOperation(ScalarOperationBlock),

    // Logic
    LogicOperation(LogicOperationBlock),

    // Routing
    Mux(Mux),
    Switch(Switch),

    // Transforms
    Dwt(Dwt),
}

impl BlockKind {
    /// Variant name, stable across parameter changes
    pub fn variant_name(&self) -> &'static str {
        match self {
            BlockKind::ImportCsv(_) => "ImportCsv",
            BlockKind::ImportText(_) => "ImportText",
            BlockKind::Repeat(_) => "Repeat",
            BlockKind::Unique(_) => "Unique",
            BlockKind::Interpolation(_) => "Interpolation",
            BlockKind::NormalDistribution(_) => "NormalDistribution",
            BlockKind::ScalarOperation(_) => "ScalarOperation",
            BlockKind::LogicOperation(_) => "LogicOperation",
            BlockKind::Mux(_) => "Mux",
            BlockKind::Switch(_) => "Switch",
            BlockKind::Dwt(_) => "Dwt",
        }
    }
}

impl Process for BlockKind {
    fn name(&self) -> &'static str {
        dispatch_method!(self, name)
    }

    fn processing_type(&self) -> ProcessingType {
        dispatch_method!(self, processing_type)
    }

    fn ports(&self) -> PortLayout {
        dispatch_method!(self, ports)
    }

    fn execute(&self, inputs: &Inputs<'_>) -> Result<Execution> {
        dispatch_method!(self, execute, inputs)
    }
}

/// Typed access to the parameter struct held by a [`BlockKind`]
pub trait KindOf: Sized {
    /// Variant name matching [`BlockKind::variant_name`]
    const VARIANT: &'static str;

    fn from_kind(kind: &BlockKind) -> Option<&Self>;

    fn from_kind_mut(kind: &mut BlockKind) -> Option<&mut Self>;
}

macro_rules! impl_kind {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for BlockKind {
                fn from(block: $ty) -> Self {
                    BlockKind::$variant(block)
                }
            }

            impl KindOf for $ty {
                const VARIANT: &'static str = stringify!($variant);

                fn from_kind(kind: &BlockKind) -> Option<&Self> {
                    match kind {
                        BlockKind::$variant(b) => Some(b),
                        _ => None,
                    }
                }

                fn from_kind_mut(kind: &mut BlockKind) -> Option<&mut Self> {
                    match kind {
                        BlockKind::$variant(b) => Some(b),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_kind! {
    ImportCsv => ImportCsv,
    ImportText => ImportText,
    Repeat => Repeat,
    Unique => Unique,
    Interpolation => Interpolation,
    NormalDistribution => NormalDistribution,
    ScalarOperation => ScalarOperationBlock,
    LogicOperation => LogicOperationBlock,
    Mux => Mux,
    Switch => Switch,
    Dwt => Dwt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let kind = BlockKind::from(Mux::new(4));
        assert_eq!(kind.name(), "Mux");
        assert_eq!(kind.processing_type(), ProcessingType::Routing);
        assert_eq!(kind.ports().inputs.len(), 4);
    }

    #[test]
    fn test_typed_access() {
        let mut kind = BlockKind::from(Repeat::new(2, 3));
        assert_eq!(Repeat::from_kind(&kind).map(|r| r.frame_size()), Some(2));
        assert!(Unique::from_kind(&kind).is_none());
        if let Some(repeat) = Repeat::from_kind_mut(&mut kind) {
            repeat.set_frame_size(5);
        }
        assert_eq!(Repeat::from_kind(&kind).map(|r| r.frame_size()), Some(5));
    }

    #[test]
    fn test_variant_names_match() {
        let kinds = [
            BlockKind::from(ImportText::default()),
            BlockKind::from(ScalarOperationBlock::default()),
            BlockKind::from(Dwt::default()),
        ];
        let names: Vec<_> = kinds.iter().map(BlockKind::variant_name).collect();
        assert_eq!(names, vec!["ImportText", "ScalarOperation", "Dwt"]);
        assert_eq!(ScalarOperationBlock::VARIANT, "ScalarOperation");
    }
}
