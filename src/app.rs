//! Command-line operations
//!
//! The binary parses arguments and delegates here, so every command can be
//! driven from tests without spawning a process.

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use wavestudio_core::dwt::{execute_dwt, MotherWavelet};
use wavestudio_core::hash::{match_grids, PixelGrid};
use wavestudio_core::import::{parse_signals, ImportOptions};
use wavestudio_core::signal::{format_signals, Signal};
use wavestudio_core::WaveError;
use wavestudio_types::{Band, EngineSettings, SettingsError};

/// Errors surfaced by the command-line tool
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Engine(#[from] WaveError),

    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl AppError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Settings(_) => 2,
            AppError::Open { .. } => 3,
            AppError::Engine(WaveError::LengthMismatch { .. }) => 4,
            AppError::Engine(_) => 1,
        }
    }
}

/// Command-line overrides applied on top of the settings file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub hash_size: Option<usize>,
    pub threshold: Option<f64>,
    pub wavelet: Option<String>,
    pub band: Option<Band>,
    pub levels: Option<usize>,
}

/// Load settings (defaults when no file is given) and apply overrides
pub fn resolve_settings(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<EngineSettings, AppError> {
    let mut settings = match path {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };
    let hash = &mut settings.hash;
    if let Some(size) = overrides.hash_size {
        hash.hash_size = size;
    }
    if let Some(threshold) = overrides.threshold {
        hash.threshold = threshold;
    }
    if let Some(wavelet) = &overrides.wavelet {
        hash.wavelet.clone_from(wavelet);
    }
    if let Some(band) = overrides.band {
        hash.band = band;
    }
    if let Some(levels) = overrides.levels {
        hash.levels = levels;
    }
    settings.validate()?;
    Ok(settings)
}

fn read_signals(path: &Path, options: &ImportOptions) -> Result<Vec<Signal>, AppError> {
    let file = File::open(path).map_err(|source| AppError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_signals(file, options)?)
}

/// Read a grayscale grid stored as one CSV row per pixel row
pub fn read_grid(path: &Path) -> Result<PixelGrid, AppError> {
    let rows: Vec<Vec<f64>> = read_signals(path, &ImportOptions::default())?
        .into_iter()
        .map(|s| s.samples)
        .collect();
    Ok(PixelGrid::from_rows(&rows)?)
}

/// Similarity percentage of two grid files
pub fn match_files(first: &Path, second: &Path, settings: &EngineSettings) -> Result<f64, AppError> {
    let a = read_grid(first)?;
    let b = read_grid(second)?;
    let side = settings.hash.hash_size;
    for (path, grid) in [(first, &a), (second, &b)] {
        if !grid.is_square(side) {
            warn!(
                path = %path.display(),
                width = grid.width(),
                height = grid.height(),
                hash_size = side,
                "grid is not hash_size x hash_size"
            );
        }
    }
    let score = match_grids(&a, &b, &settings.hash)?;
    info!(score, "matched grids");
    Ok(score)
}

/// Decompose every signal of a CSV file, returning printable bands
pub fn decompose_file(path: &Path, settings: &EngineSettings) -> Result<String, AppError> {
    let signals = read_signals(path, &ImportOptions::default())?;
    let wavelet = MotherWavelet::load_from_name(&settings.hash.wavelet)?;
    let mut blocks = Vec::new();
    for (index, signal) in signals.iter().enumerate() {
        let name = if signal.name.is_empty() {
            format!("Signal {}", index + 1)
        } else {
            signal.name.clone()
        };
        for level in execute_dwt(signal, &wavelet, settings.hash.levels)? {
            let bands = [
                Signal::new(level.approximation),
                Signal::new(level.details),
            ];
            blocks.push(format!(
                "# {name} level {} ({})\n{}",
                level.level,
                wavelet.name(),
                format_signals(&bands, 6, " ")
            ));
        }
    }
    Ok(blocks.join("\n"))
}
