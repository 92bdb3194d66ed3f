//! Core types for the CBF log decoder library
//!
//! This module defines everything the decoder returns when processing a CBF
//! buffer. The decoder is a pure function: all output, including recoverable
//! parse anomalies, is carried by [`DecodeResult`].

use serde::Serialize;
use std::fmt;

/// Result type for fallible library operations (file I/O, rendering)
pub type Result<T> = std::result::Result<T, DecoderError>;

/// One data row: exactly one value per field definition, in field order
pub type Record = Vec<String>;

/// Errors that abort an operation outright
///
/// Problems inside the CBF byte stream are never reported here; they are
/// collected as [`ParseError`] values on the [`DecodeResult`].
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),
}

/// Named parsing phase, used to tag truncation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Heading1,
    Heading2,
    Heading3,
    FieldHeader,
    Data,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Heading1 => write!(f, "heading1"),
            Stage::Heading2 => write!(f, "heading2"),
            Stage::Heading3 => write!(f, "heading3"),
            Stage::FieldHeader => write!(f, "fieldheader"),
            Stage::Data => write!(f, "data"),
        }
    }
}

/// A recoverable anomaly found while decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ParseError {
    /// The buffer ran out in the middle of a stage
    #[error("end of file during {0} parse")]
    UnexpectedEndOfFile(Stage),

    /// The trailer's record count disagrees with the records actually read.
    /// `expected` is `None` when no trailer was found (reported as -1).
    #[error("read {actual} records but expected {} records", expected_or_sentinel(.expected))]
    RecordCountMismatch { expected: Option<u32>, actual: usize },
}

fn expected_or_sentinel(expected: &Option<u32>) -> i64 {
    expected.map_or(-1, i64::from)
}

impl ParseError {
    /// True for truncation errors
    pub fn is_truncation(&self) -> bool {
        matches!(self, ParseError::UnexpectedEndOfFile(_))
    }

    /// Stage of a truncation error
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ParseError::UnexpectedEndOfFile(stage) => Some(*stage),
            ParseError::RecordCountMismatch { .. } => None,
        }
    }
}

/// The heading strings at the start of a CBF file
///
/// A complete file carries three: program identifier, run mode, and the
/// parameter description. Fewer are present when decoding stopped early.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headings(Vec<String>);

impl Headings {
    pub(crate) fn push(&mut self, heading: String) {
        self.0.push(heading);
    }

    /// Foxwell program identifier (first heading)
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Run mode identifier (second heading)
    pub fn run_mode(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// Program parameter description (third heading)
    pub fn parameters(&self) -> Option<&str> {
        self.0.get(2).map(String::as_str)
    }

    /// True once all three headings were read
    pub fn is_complete(&self) -> bool {
        self.0.len() == 3
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// A column of the data table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Field name with its unit appended, e.g. `"Engine RPM rpm"`
    pub name: String,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The end-of-table trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trailer {
    /// Record count the device wrote
    pub expected_records: u32,
    /// Byte offset of the count (the marker follows 4 bytes later)
    pub offset: usize,
    /// Uninterpreted bytes after the end marker (CR-LF on some modules)
    pub trailing_bytes: usize,
}

/// Everything decoded from one CBF buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeResult {
    pub headings: Headings,
    /// Field count declared in the header, if it was reached
    pub field_count: Option<u16>,
    pub fields: Vec<FieldDefinition>,
    pub records: Vec<Record>,
    pub trailer: Option<Trailer>,
    pub errors: Vec<ParseError>,
}

impl DecodeResult {
    /// True when decoding finished without any parse error
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when decoding stopped early on a truncated buffer
    pub fn is_truncated(&self) -> bool {
        self.errors.iter().any(ParseError::is_truncation)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Record count reported by the trailer
    pub fn expected_records(&self) -> Option<u32> {
        self.trailer.map(|t| t.expected_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            ParseError::UnexpectedEndOfFile(Stage::FieldHeader).to_string(),
            "end of file during fieldheader parse"
        );
        assert_eq!(
            ParseError::RecordCountMismatch { expected: Some(189), actual: 188 }.to_string(),
            "read 188 records but expected 189 records"
        );
        assert_eq!(
            ParseError::RecordCountMismatch { expected: None, actual: 3 }.to_string(),
            "read 3 records but expected -1 records"
        );
    }

    #[test]
    fn test_parse_error_stage() {
        assert_eq!(
            ParseError::UnexpectedEndOfFile(Stage::Data).stage(),
            Some(Stage::Data)
        );
        let mismatch = ParseError::RecordCountMismatch { expected: Some(1), actual: 0 };
        assert!(!mismatch.is_truncation());
        assert_eq!(mismatch.stage(), None);
    }

    #[test]
    fn test_headings_accessors() {
        let mut headings = Headings::default();
        headings.push("OBDII".to_string());
        headings.push("Live Data".to_string());
        assert_eq!(headings.program(), Some("OBDII"));
        assert_eq!(headings.run_mode(), Some("Live Data"));
        assert_eq!(headings.parameters(), None);
        assert!(!headings.is_complete());

        headings.push("Engine".to_string());
        assert!(headings.is_complete());
        assert_eq!(headings.iter().collect::<Vec<_>>(), ["OBDII", "Live Data", "Engine"]);
    }

    #[test]
    fn test_decode_result_helpers() {
        let mut result = DecodeResult::default();
        assert!(result.is_clean());

        result.errors.push(ParseError::UnexpectedEndOfFile(Stage::Data));
        assert!(!result.is_clean());
        assert!(result.is_truncated());
        assert_eq!(result.expected_records(), None);
    }
}
