//! Error types for the engine

use thiserror::Error;
use wavestudio_types::PortDirection;

use crate::graph::{BlockId, PortId};

/// Engine errors
#[derive(Error, Debug)]
pub enum WaveError {
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Unknown wavelet: {0}")]
    UnknownWavelet(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown block: {0}")]
    UnknownBlock(BlockId),

    #[error("Unknown port: {0}")]
    UnknownPort(PortId),

    #[error("Port {port} is an {found} port, expected {expected}")]
    PortDirection {
        port: PortId,
        expected: PortDirection,
        found: PortDirection,
    },

    #[error("Cannot connect two {0} ports")]
    SameDirection(PortDirection),

    #[error("Block kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, WaveError>;
