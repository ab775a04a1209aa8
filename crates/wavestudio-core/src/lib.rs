//! WaveStudio core - signal dataflow graph and wavelet kernel
//!
//! Blocks exchange lists of [`Signal`]s through typed ports. Executing a block
//! pushes its fresh outputs downstream, depth-first, to every block that has
//! cascading enabled. A discrete wavelet transform sits on top of the signal
//! primitives and backs a small perceptual image hash.
//!
//! # Architecture
//!
//! - [`Graph`] owns blocks and ports in arenas; ids never dangle into freed
//!   memory, and removing a block clears every link into it
//! - [`BlockKind`] is a closed enum over the block catalog, dispatched by `match`
//! - [`Process`] is the contract each catalog entry implements
//!
//! # Example
//!
//! ```rust,ignore
//! use wavestudio_core::prelude::*;
//!
//! let mut graph = Graph::new();
//! let source = graph.add_block(ImportText::new("1,9,0,1,2,5,-4,4"));
//! let repeat = graph.add_block(Repeat::new(4, 1));
//! graph.connect_blocks(source, repeat)?;
//! graph.execute(source)?;
//! println!("{}", graph.output_signals(repeat, 0)?[0]);
//! ```

pub mod block;
pub mod block_kind;
pub mod blocks;
pub mod dwt;
pub mod error;
pub mod graph;
pub mod hash;
pub mod import;
pub mod math;
pub mod signal;

pub use block::{Execution, Inputs, Process};
pub use block_kind::{BlockKind, KindOf};
pub use blocks::*;
pub use dwt::{decompose, execute_dwt, DecompositionLevel, MotherWavelet};
pub use error::{Result, WaveError};
pub use graph::{Block, BlockId, Graph, Port, PortId};
pub use hash::{fingerprint, match_grids, rms_distance, similarity, PixelGrid};
pub use import::{parse_signals, parse_text, read_signals_from_path, ImportOptions};
pub use signal::{format_signals, Signal};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::block::{Execution, Inputs, Process};
    pub use crate::block_kind::{BlockKind, KindOf};
    pub use crate::blocks::*;
    pub use crate::dwt::{decompose, execute_dwt, DecompositionLevel, MotherWavelet};
    pub use crate::error::{Result, WaveError};
    pub use crate::graph::{Block, BlockId, Graph, Port, PortId};
    pub use crate::hash::{match_grids, PixelGrid};
    pub use crate::math::{InterpolationMode, LogicOperation, ScalarOperation, SwitchCriteria};
    pub use crate::signal::Signal;
    pub use wavestudio_types::{
        Band, EngineSettings, GraphSettings, HashSettings, PortDirection, ProcessingType,
    };
}
