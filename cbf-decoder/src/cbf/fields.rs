//! Field-definition table parsing
//!
//! Each field is written as `<name>\0<unit>\0`, optionally preceded by a
//! 10-byte block starting with `06` (OBD2 captures carry a counting byte in
//! it). The table has no end marker: it ends once the declared number of
//! fields has been read.
//!
//! ## State machine
//!
//! | state             | byte       | action                                   | next              |
//! |-------------------|------------|------------------------------------------|-------------------|
//! | any but skipping  | `06`       | start skipping the 10-byte block         | `SkippingMarker`  |
//! | `AccumulatingName`| `00`       | append a space if the label is non-empty | `SeenFirstZero`   |
//! | `SeenFirstZero`   | `00`       | finish the field                         | `AccumulatingName`|
//! | `AccumulatingName`/`SeenFirstZero` | other | append if above 31          | unchanged         |
//! | `SkippingMarker`  | any        | count down                               | resume when done  |

use super::{latin1, DEGREE_BYTE, DEGREE_TEXT, FIELD_MARKER, FIELD_MARKER_LEN};
use crate::cursor::ByteCursor;
use crate::types::FieldDefinition;

/// Per-field parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Reading the field name; no zero seen yet
    AccumulatingName,
    /// The name terminator was seen; reading the unit
    SeenFirstZero,
    /// Inside a `06` block. `remaining` bytes are left to skip, then parsing
    /// resumes in the state the block interrupted.
    SkippingMarker { remaining: usize, seen_zero: bool },
}

/// Outcome of feeding one byte to a [`FieldParser`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldStep {
    /// More bytes are needed for the current field
    Continue,
    /// A field ended with a non-empty label
    Completed(FieldDefinition),
    /// A field ended with an empty label and does not count
    Discarded,
}

/// Byte-at-a-time parser for one field definition after another
#[derive(Debug, Clone)]
pub struct FieldParser {
    state: FieldState,
    label: Vec<u8>,
}

impl FieldParser {
    pub fn new() -> Self {
        Self {
            state: FieldState::AccumulatingName,
            label: Vec::new(),
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Feed the next byte of the table
    pub fn feed(&mut self, byte: u8) -> FieldStep {
        match self.state {
            FieldState::SkippingMarker { remaining, seen_zero } => {
                self.state = match remaining - 1 {
                    0 if seen_zero => FieldState::SeenFirstZero,
                    0 => FieldState::AccumulatingName,
                    remaining => FieldState::SkippingMarker { remaining, seen_zero },
                };
                FieldStep::Continue
            }
            state if byte == FIELD_MARKER => {
                self.state = FieldState::SkippingMarker {
                    remaining: FIELD_MARKER_LEN - 1,
                    seen_zero: state == FieldState::SeenFirstZero,
                };
                FieldStep::Continue
            }
            FieldState::SeenFirstZero if byte == 0 => self.finish(),
            FieldState::AccumulatingName if byte == 0 => {
                // Name and unit are joined with a single space
                if !self.label.is_empty() {
                    self.label.push(b' ');
                }
                self.state = FieldState::SeenFirstZero;
                FieldStep::Continue
            }
            _ => {
                if byte > 31 {
                    self.label.push(byte);
                }
                FieldStep::Continue
            }
        }
    }

    fn finish(&mut self) -> FieldStep {
        let label = std::mem::take(&mut self.label);
        self.state = FieldState::AccumulatingName;

        let name = finish_label(&label);
        if name.is_empty() {
            FieldStep::Discarded
        } else {
            FieldStep::Completed(FieldDefinition::new(name))
        }
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand degree signs and drop trailing spaces
fn finish_label(label: &[u8]) -> String {
    let mut name = String::with_capacity(label.len());
    for &byte in label {
        if byte == DEGREE_BYTE {
            name.push_str(DEGREE_TEXT);
        } else {
            name.push(char::from(byte));
        }
    }
    name.truncate(name.trim_end_matches(' ').len());
    name
}

/// Field table read from the buffer
pub(super) struct FieldTable {
    pub fields: Vec<FieldDefinition>,
    /// False when the buffer ended before `field_count` fields were read
    pub complete: bool,
}

pub(super) fn parse_field_table(cursor: &mut ByteCursor<'_>, field_count: usize) -> FieldTable {
    let mut parser = FieldParser::new();
    let mut fields = Vec::with_capacity(field_count);

    while fields.len() < field_count {
        let Some(byte) = cursor.next_byte() else {
            return FieldTable { fields, complete: false };
        };

        match parser.feed(byte) {
            FieldStep::Completed(field) => {
                log::trace!("Field {}: {:?}", fields.len(), field.name);
                fields.push(field);
            }
            FieldStep::Discarded => {
                log::trace!("Skipping empty field label at offset {}", cursor.position());
            }
            FieldStep::Continue => {}
        }
    }

    FieldTable { fields, complete: true }
}
