//! Heading block parsing

use super::{latin1, OPAQUE_MARKER_LEN};
use crate::cursor::ByteCursor;
use crate::types::{Headings, Stage};

/// Read the three headings and the opaque block between the second and third.
///
/// Headings read before a failure stay in `headings`; the error carries the
/// stage that ran out of bytes.
pub(super) fn parse_headings(
    cursor: &mut ByteCursor<'_>,
    headings: &mut Headings,
) -> Result<(), Stage> {
    headings.push(read_heading(cursor, Stage::Heading1)?);
    headings.push(read_heading(cursor, Stage::Heading2)?);

    // Usually 7B 14 8E 3F 00 00 00 00; meaning unknown, only the length matters
    cursor.skip(OPAQUE_MARKER_LEN).ok_or(Stage::Heading3)?;

    headings.push(read_heading(cursor, Stage::Heading3)?);
    Ok(())
}

fn read_heading(cursor: &mut ByteCursor<'_>, stage: Stage) -> Result<String, Stage> {
    let heading = cursor.read_cstring().map(latin1).ok_or(stage)?;
    log::trace!("{}: {:?}", stage, heading);
    Ok(heading)
}
