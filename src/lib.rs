//! WaveStudio - block-based signal dataflow with a wavelet kernel
//!
//! Re-exports the engine crates and the operations behind the `wavestudio`
//! command-line tool.
//!
//! # Example
//!
//! ```rust,ignore
//! use wavestudio::prelude::*;
//!
//! let settings = EngineSettings::default();
//! let score = wavestudio::app::match_files("a.csv".as_ref(), "b.csv".as_ref(), &settings)?;
//! println!("Match = {score:.1}%");
//! ```

pub mod app;

pub use wavestudio_core as engine;
pub use wavestudio_core::*;
pub use wavestudio_types as types;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::{AppError, Overrides};
    pub use wavestudio_core::prelude::*;
}
