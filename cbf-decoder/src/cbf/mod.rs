//! Foxwell CBF binary log decoder
//!
//! CBF is a tabular format analogous to CSV: values are decimal ASCII
//! strings terminated by zero bytes, with no record separator. Records are
//! recovered by counting fields.
//!
//! ## Layout
//! ```text
//! <heading1>\0 <heading2>\0 <8 opaque bytes, e.g. 7B 14 8E 3F 00 00 00 00> <heading3>\0
//! <field_count: u16 LE>
//! field_count x [06 + 9 bytes]? <name>\0 <unit>\0
//! N x (field_count x <value>\0)
//! <record_count: u32 LE> AA 55 33 11 [0D 0A]
//! ```
//!
//! The 10-byte block starting with `06` appears before each field name on
//! OBD2 captures but not on Honda captures. Units use `B0` for a degree sign.
//! The CR-LF after the end marker was only seen on Honda captures.
//!
//! The end of the table is found by looking 4 bytes past the terminator of
//! each completed record for the end marker. A record whose trailing bytes
//! happen to match that window ends the table early; the format offers
//! nothing better.

mod fields;
mod header;
mod records;

pub use fields::{FieldParser, FieldState, FieldStep};

use crate::cursor::ByteCursor;
use crate::types::{DecodeResult, ParseError, Stage};

/// Opaque bytes between the second and third heading
pub const OPAQUE_MARKER_LEN: usize = 8;

/// First byte of the optional per-field block
pub const FIELD_MARKER: u8 = 0x06;

/// Length of the optional per-field block, including its first byte
pub const FIELD_MARKER_LEN: usize = 10;

/// Degree sign as written by the device
pub const DEGREE_BYTE: u8 = 0xB0;

/// Text substituted for [`DEGREE_BYTE`] in field names
pub const DEGREE_TEXT: &str = "deg ";

/// End-of-file marker that follows the record count
pub const END_MARKER: [u8; 4] = [0xAA, 0x55, 0x33, 0x11];

/// Decode a complete CBF buffer
///
/// Never fails: truncation and count disagreements are collected in
/// [`DecodeResult::errors`] alongside everything parsed before the problem.
///
/// # Example
/// ```
/// let mut file = b"A\0B\0".to_vec();
/// file.extend_from_slice(&[0x7B, 0x14, 0x8E, 0x3F, 0, 0, 0, 0]);
/// file.extend_from_slice(b"C\0\x01\x00X\0\0");
/// file.extend_from_slice(b"5\0\x01\x00\x00\x00\xAA\x55\x33\x11");
///
/// let result = cbf_decoder::decode(&file);
/// assert!(result.errors.is_empty());
/// assert_eq!(result.records, vec![vec!["5".to_string()]]);
/// ```
pub fn decode(data: &[u8]) -> DecodeResult {
    let mut result = DecodeResult::default();
    let mut cursor = ByteCursor::new(data);

    log::debug!("Decoding CBF buffer ({} bytes)", data.len());

    if let Err(stage) = header::parse_headings(&mut cursor, &mut result.headings) {
        return abort(result, stage);
    }

    let Some(field_count) = cursor.read_u16_le() else {
        return abort(result, Stage::FieldHeader);
    };
    result.field_count = Some(field_count);
    log::debug!("Header declares {} fields", field_count);

    let table = fields::parse_field_table(&mut cursor, usize::from(field_count));
    result.fields = table.fields;
    if !table.complete {
        return abort(result, Stage::FieldHeader);
    }

    let scan = records::parse_records(&mut cursor, usize::from(field_count));
    result.records = scan.records;
    result.trailer = scan.trailer;
    if scan.truncated {
        log::warn!(
            "Buffer ended inside a record after {} complete records",
            result.records.len()
        );
        result.errors.push(ParseError::UnexpectedEndOfFile(Stage::Data));
    }

    let expected = result.expected_records();
    let actual = result.records.len();
    if expected.map(|count| count as usize) != Some(actual) {
        log::warn!(
            "Record count mismatch: read {}, trailer says {:?}",
            actual,
            expected
        );
        result
            .errors
            .push(ParseError::RecordCountMismatch { expected, actual });
    }

    log::debug!(
        "Decoded {} fields, {} records, {} errors",
        result.fields.len(),
        result.records.len(),
        result.errors.len()
    );
    result
}

fn abort(mut result: DecodeResult, stage: Stage) -> DecodeResult {
    log::warn!("Unexpected end of file during {} parse", stage);
    result.errors.push(ParseError::UnexpectedEndOfFile(stage));
    result
}

/// Map each byte to the character with the same code point (ISO-8859-1)
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
