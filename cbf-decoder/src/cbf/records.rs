//! Data table and trailer parsing

use super::{latin1, END_MARKER};
use crate::cursor::ByteCursor;
use crate::types::{Record, Trailer};
use byteorder::{ByteOrder, LittleEndian};

/// Trailer length: u32 record count followed by the end marker
const TRAILER_LEN: usize = 4 + END_MARKER.len();

pub(super) struct RecordScan {
    pub records: Vec<Record>,
    pub trailer: Option<Trailer>,
    /// The buffer ended in the middle of a record
    pub truncated: bool,
}

/// Read records until the trailer is found or the buffer runs out
pub(super) fn parse_records(cursor: &mut ByteCursor<'_>, field_count: usize) -> RecordScan {
    let mut scan = RecordScan {
        records: Vec::new(),
        trailer: None,
        truncated: false,
    };

    if field_count == 0 {
        // No record can consume bytes, so only the trailer can follow
        scan.trailer = take_trailer(cursor);
        return scan;
    }

    while !cursor.is_at_end() {
        let Some(record) = read_record(cursor, field_count) else {
            scan.truncated = true;
            break;
        };
        log::trace!("Record {}: {:?}", scan.records.len(), record);
        scan.records.push(record);

        if let Some(trailer) = take_trailer(cursor) {
            log::debug!(
                "Trailer at offset {} reports {} records",
                trailer.offset,
                trailer.expected_records
            );
            scan.trailer = Some(trailer);
            break;
        }
    }

    scan
}

/// Read `field_count` zero-terminated values; `None` if the buffer ends first
fn read_record(cursor: &mut ByteCursor<'_>, field_count: usize) -> Option<Record> {
    (0..field_count)
        .map(|_| cursor.read_cstring().map(latin1))
        .collect()
}

/// Consume the trailer if the next 8 bytes are a record count and the end marker
fn take_trailer(cursor: &mut ByteCursor<'_>) -> Option<Trailer> {
    let window = cursor.peek(TRAILER_LEN)?;
    if window[4..] != END_MARKER {
        return None;
    }

    let trailer = Trailer {
        expected_records: LittleEndian::read_u32(&window[..4]),
        offset: cursor.position(),
        trailing_bytes: cursor.remaining() - TRAILER_LEN,
    };
    cursor.skip(TRAILER_LEN)?;
    Some(trailer)
}
