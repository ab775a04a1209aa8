//! Engine settings types.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::{DEFAULT_HASH_SIZE, DEFAULT_WAVELET};

/// Errors raised while loading or saving settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Coefficient band of a decomposition level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Approximation,
    #[default]
    Details,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Approximation => "approximation",
            Band::Details => "details",
        }
    }
}

impl std::str::FromStr for Band {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approximation" | "approx" | "a" => Ok(Band::Approximation),
            "details" | "detail" | "d" => Ok(Band::Details),
            other => Err(SettingsError::Invalid(format!("unknown band '{other}'"))),
        }
    }
}

/// Perceptual hash settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashSettings {
    /// Side length of the square pixel grid
    pub hash_size: usize,

    /// Mother wavelet name
    pub wavelet: String,

    /// Decomposition levels; the fingerprint is taken from the last one
    pub levels: usize,

    /// Band used as fingerprint
    pub band: Band,

    /// Grayscale values strictly above this are white
    pub threshold: f64,
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            hash_size: DEFAULT_HASH_SIZE,
            wavelet: DEFAULT_WAVELET.to_string(),
            levels: 1,
            band: Band::Details,
            threshold: 15.0,
        }
    }
}

/// Graph execution settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Upper bound on cascade depth (`None` = unbounded)
    pub max_cascade_depth: Option<usize>,
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub hash: HashSettings,
    pub graph: GraphSettings,
}

impl EngineSettings {
    /// Load from JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write as pretty JSON to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.hash.hash_size == 0 {
            return Err(SettingsError::Invalid("hash_size must be positive".into()));
        }
        if self.hash.levels == 0 {
            return Err(SettingsError::Invalid("levels must be positive".into()));
        }
        if !self.hash.threshold.is_finite() {
            return Err(SettingsError::Invalid("threshold must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.hash.hash_size, 256);
        assert_eq!(settings.hash.wavelet, "haar");
        assert_eq!(settings.hash.levels, 1);
        assert_eq!(settings.hash.band, Band::Details);
        assert_eq!(settings.hash.threshold, 15.0);
        assert_eq!(settings.graph.max_cascade_depth, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = EngineSettings::from_json(r#"{"hash": {"hash_size": 64}}"#).unwrap();
        assert_eq!(settings.hash.hash_size, 64);
        assert_eq!(settings.hash.wavelet, "haar");
        assert_eq!(settings.graph, GraphSettings::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = EngineSettings::default();
        settings.hash.band = Band::Approximation;
        settings.graph.max_cascade_depth = Some(4);
        let json = settings.to_json().unwrap();
        assert_eq!(EngineSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_zero_hash_size_rejected() {
        let err = EngineSettings::from_json(r#"{"hash": {"hash_size": 0}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"hash": {"wavelet": "db2", "band": "approximation"}}"#)
            .unwrap();
        let settings = EngineSettings::load(&path).unwrap();
        assert_eq!(settings.hash.wavelet, "db2");
        assert_eq!(settings.hash.band, Band::Approximation);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineSettings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_band_from_str() {
        assert_eq!("Details".parse::<Band>().unwrap(), Band::Details);
        assert_eq!("approx".parse::<Band>().unwrap(), Band::Approximation);
        assert!("middle".parse::<Band>().is_err());
    }
}
