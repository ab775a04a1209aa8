//! Delimited text import
//!
//! One row per signal. Rows may carry a leading name column; an optional
//! first row is skipped as a header. Fields that do not parse as finite
//! numbers are skipped and rows without any value are dropped.

use std::io;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::error::{Result, WaveError};
use crate::signal::Signal;

/// Parser options shared by the file and text import blocks
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Column separator (single character)
    pub delimiter: char,
    /// Skip the first row
    pub ignore_first_row: bool,
    /// The first column of every row holds the signal name
    pub name_in_first_column: bool,
    /// Start time given to every imported signal
    pub start: f64,
    /// Sampling interval given to every imported signal
    pub sampling_interval: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            ignore_first_row: false,
            name_in_first_column: false,
            start: 0.0,
            sampling_interval: 1.0,
        }
    }
}

impl ImportOptions {
    fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(WaveError::InvalidParameter(format!(
                "column separator must be a single ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }
}

/// Parse every row of `reader` into a signal
pub fn parse_signals<R: io::Read>(reader: R, options: &ImportOptions) -> Result<Vec<Signal>> {
    let mut csv = ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .has_headers(options.ignore_first_row)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut signals = Vec::new();
    let mut record = ByteRecord::new();
    while csv.read_byte_record(&mut record)? {
        let line = record.position().map_or(signals.len() as u64 + 1, |p| p.line());
        if let Some(signal) = parse_row(&record, line, options) {
            signals.push(signal);
        } else {
            debug!(line, "dropping row without values");
        }
    }
    Ok(signals)
}

/// Parse in-memory text
pub fn parse_text(text: &str, options: &ImportOptions) -> Result<Vec<Signal>> {
    parse_signals(text.as_bytes(), options)
}

/// Read a file, yielding no signals when it is missing or unreadable
pub fn read_signals_from_path(path: impl AsRef<Path>, options: &ImportOptions) -> Vec<Signal> {
    let path = path.as_ref();
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot open signal file");
            return Vec::new();
        }
    };
    match parse_signals(io::BufReader::new(file), options) {
        Ok(signals) => signals,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read signal file");
            Vec::new()
        }
    }
}

fn parse_row(record: &ByteRecord, line: u64, options: &ImportOptions) -> Option<Signal> {
    let mut fields = record.iter().filter(|field| !field.is_empty());

    let mut name = String::new();
    if options.name_in_first_column {
        name = String::from_utf8_lossy(fields.next()?).into_owned();
    }

    let mut values = Vec::new();
    for (column, field) in fields.enumerate() {
        match parse_value(field) {
            Some(value) => values.push(value),
            None => warn!(
                line,
                column,
                field = %String::from_utf8_lossy(field),
                "skipping unparseable field"
            ),
        }
    }
    if values.is_empty() {
        return None;
    }

    if name.is_empty() {
        name = format!("Line {line}");
    }
    let count = values.len() as f64;
    let mut signal = Signal::named(name, values).with_sampling_interval(options.sampling_interval);
    signal.start = options.start;
    signal.finish = options.start + options.sampling_interval * count - options.sampling_interval;
    Some(signal)
}

fn parse_value(field: &[u8]) -> Option<f64> {
    std::str::from_utf8(field)
        .ok()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_rows() {
        let signals = parse_text("1.1,9.12355,0.123456\n-1.1,0.123456", &ImportOptions::default())
            .unwrap();
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].samples, vec![1.1, 9.12355, 0.123456]);
        assert_eq!(signals[1].samples, vec![-1.1, 0.123456]);
        assert_eq!(signals[0].name, "Line 1");
        assert_eq!(signals[1].name, "Line 2");
    }

    #[test]
    fn test_header_and_names() {
        let text = "name;a;b;c\nSignal1;1.1;9.12355;0\nSignal2;-1.1;0";
        let options = ImportOptions {
            delimiter: ';',
            ignore_first_row: true,
            name_in_first_column: true,
            ..Default::default()
        };
        let signals = parse_text(text, &options).unwrap();
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].name, "Signal1");
        assert_eq!(signals[0].samples, vec![1.1, 9.12355, 0.0]);
        assert_eq!(signals[1].name, "Signal2");
    }

    #[test]
    fn test_timing_metadata() {
        let options = ImportOptions {
            start: 2.0,
            sampling_interval: 0.5,
            ..Default::default()
        };
        let signals = parse_text("1,2,3,4", &options).unwrap();
        let signal = &signals[0];
        assert_relative_eq!(signal.start, 2.0);
        assert_relative_eq!(signal.finish, 3.5);
        assert_eq!(signal.sampling_rate(), 2);
    }

    #[test]
    fn test_bad_fields_and_empty_rows_skipped() {
        let text = "1,abc,2\nfoo,bar\n\n3,,4,NaN";
        let signals = parse_text(text, &ImportOptions::default()).unwrap();
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].samples, vec![1.0, 2.0]);
        assert_eq!(signals[1].samples, vec![3.0, 4.0]);
    }

    #[test]
    fn test_quote_characters_are_plain_text() {
        let signals = parse_text("1,\"2\n3,4\n5,6", &ImportOptions::default()).unwrap();
        let samples: Vec<_> = signals.iter().map(|s| s.samples.clone()).collect();
        assert_eq!(samples, vec![vec![1.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!(signals[2].name, "Line 3");
    }

    #[test]
    fn test_space_separator_collapses_runs() {
        let options = ImportOptions {
            delimiter: ' ',
            ..Default::default()
        };
        let signals = parse_text("1  2 3", &options).unwrap();
        assert_eq!(signals[0].samples, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let options = ImportOptions {
            delimiter: '§',
            ..Default::default()
        };
        assert!(matches!(
            parse_text("1§2", &options),
            Err(WaveError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_no_signals() {
        let signals = read_signals_from_path("does/not/exist.csv", &ImportOptions::default());
        assert!(signals.is_empty());
    }

    #[test]
    fn test_binary_file_gives_no_signals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xffu8, 0xfe, 0x00, 0x9c, 0x0a, 0xc3]).unwrap();
        let signals = read_signals_from_path(&path, &ImportOptions::default());
        assert!(signals.is_empty());
    }
}
