//! Signal import blocks

use std::path::{Path, PathBuf};

use tracing::debug;
use wavestudio_types::{PortLayout, ProcessingType};

use crate::block::{Execution, Inputs, Process};
use crate::error::Result;
use crate::import::{parse_text, read_signals_from_path, ImportOptions};

/// Loads one signal per row of a delimited text file
///
/// A missing or unreadable file yields an empty signal list.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportCsv {
    path: PathBuf,
    options: ImportOptions,
}

impl Default for ImportCsv {
    fn default() -> Self {
        Self::new("example.csv")
    }
}

impl ImportCsv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: ImportOptions::default(),
        }
    }

    pub fn with_options(path: impl Into<PathBuf>, options: ImportOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ImportOptions {
        &mut self.options
    }
}

impl Process for ImportCsv {
    fn name(&self) -> &'static str {
        "Import from CSV"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::LoadSignal
    }

    fn ports(&self) -> PortLayout {
        PortLayout::source()
    }

    fn execute(&self, _inputs: &Inputs<'_>) -> Result<Execution> {
        let signals = read_signals_from_path(&self.path, &self.options);
        debug!(path = %self.path.display(), count = signals.len(), "imported signals");
        Ok(Execution::single(signals))
    }
}

/// Parses signals from an in-memory text parameter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportText {
    text: String,
    options: ImportOptions,
}

impl ImportText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: ImportOptions::default(),
        }
    }

    /// Use `delimiter` as column separator
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.options.delimiter = delimiter;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ImportOptions {
        &mut self.options
    }
}

impl Process for ImportText {
    fn name(&self) -> &'static str {
        "Import from text"
    }

    fn processing_type(&self) -> ProcessingType {
        ProcessingType::LoadSignal
    }

    fn ports(&self) -> PortLayout {
        PortLayout::source()
    }

    fn execute(&self, _inputs: &Inputs<'_>) -> Result<Execution> {
        Ok(Execution::single(parse_text(&self.text, &self.options)?))
    }
}
