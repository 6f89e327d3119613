//! Word scans within a single line.
//!
//! A word is a run of non-whitespace bytes. Scanning right from a column
//! skips the rest of the current word and then the whitespace after it,
//! landing on the start of the next word (or the end of the line). Scanning
//! left is the mirror: skip whitespace before the column, then the word
//! before that, landing on the word's first byte.
//!
//! Neither scan crosses a line boundary. Wrapping onto the neighbouring line
//! when already at an edge is the cursor's job.

use crate::buffer::Line;

#[inline]
const fn is_blank(byte: u8) -> bool {
    byte.is_ascii_whitespace()
}

/// Column reached by scanning right from `col`.
#[must_use]
pub fn scan_right(line: &Line, col: usize) -> usize {
    let bytes = line.as_bytes();
    let mut i = col.min(bytes.len());
    while i < bytes.len() && !is_blank(bytes[i]) {
        i += 1;
    }
    while i < bytes.len() && is_blank(bytes[i]) {
        i += 1;
    }
    i
}

/// Column reached by scanning left from `col`.
#[must_use]
pub fn scan_left(line: &Line, col: usize) -> usize {
    let bytes = line.as_bytes();
    let mut i = col.min(bytes.len());
    while i > 0 && is_blank(bytes[i - 1]) {
        i -= 1;
    }
    while i > 0 && !is_blank(bytes[i - 1]) {
        i -= 1;
    }
    i
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
