//! Source position helpers for annotating input errors.

use crate::error::StructgenError;

const LINE_FEED: u8 = b'\n';

/// Maps a byte offset in `input` to a 1-based `(line, column)` pair.
///
/// Line feeds are counted up to and including `offset`. A line feed belongs to
/// the line it opens, so the line feed byte itself sits at column 1.
pub fn line_and_column(input: &[u8], offset: usize) -> Result<(usize, usize), StructgenError> {
    if offset >= input.len() {
        return Err(StructgenError::OffsetOutOfRange {
            offset,
            len: input.len(),
        });
    }

    let mut line = 1usize;
    let mut column = 0usize;
    for &byte in &input[..=offset] {
        if byte == LINE_FEED {
            line += 1;
            column = 0;
        }
        column += 1;
    }

    Ok((line, column))
}
