//! Shared types for WaveStudio block graphs.
//!
//! This crate defines the plain data structures used across the WaveStudio components:
//! - Processing categories of block kinds
//! - Port directions and port definitions
//! - Engine settings (hashing and graph execution configuration)

mod block;
mod port;
mod settings;

pub use block::*;
pub use port::*;
pub use settings::*;

/// Default side length (in pixels) of the square grid fed to the perceptual hash
pub const DEFAULT_HASH_SIZE: usize = 256;

/// Default mother wavelet used for hashing
pub const DEFAULT_WAVELET: &str = "haar";
