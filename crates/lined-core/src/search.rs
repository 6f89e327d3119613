//! Regex search over the document.
//!
//! Patterns match within a single line. A search starts just after the
//! cursor, runs to the end of the document, then wraps to the top and
//! finishes on the cursor's own line up to and including the cursor column.
//! So repeating a search from a match finds the next one, and a lone match
//! is found again from itself.
//!
//! Byte regexes are used so match columns agree with the byte-offset column
//! model and lines holding invalid UTF-8 are still searchable.

use regex::bytes::Regex;

use crate::buffer::Document;
use crate::position::Position;

/// A match: where it starts and how many bytes it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: Position,
    pub len: usize,
}

/// Compile `pattern`.
///
/// # Errors
/// The regex error for an invalid pattern.
pub fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)
}

/// First match after `from`, wrapping around the end of the document.
#[must_use]
pub fn find_next(doc: &Document, re: &Regex, from: Position) -> Option<Match> {
    let from = doc.clamp(from);
    let count = doc.line_count();

    // Rest of the cursor's line, then every following line.
    let first = match_in_line(doc, re, from.line, from.col + 1);
    if first.is_some() {
        return first;
    }
    for offset in 1..count {
        let line = (from.line + offset) % count;
        if let Some(m) = match_in_line(doc, re, line, 0) {
            return Some(m);
        }
    }

    // Wrapped back: the cursor's line up to the cursor.
    match_in_line(doc, re, from.line, 0).filter(|m| m.start.col <= from.col)
}

/// Compile `pattern` and search once. `Ok(None)` means no match.
///
/// # Errors
/// The regex error for an invalid pattern.
pub fn search(doc: &Document, pattern: &str, from: Position) -> Result<Option<Match>, regex::Error> {
    let re = compile(pattern)?;
    let found = find_next(doc, &re, from);
    tracing::debug!(pattern, ?from, ?found, "search");
    Ok(found)
}

fn match_in_line(doc: &Document, re: &Regex, line: usize, start_col: usize) -> Option<Match> {
    let text = doc.line(line)?.as_bytes();
    if start_col > text.len() {
        return None;
    }
    re.find_at(text, start_col).map(|m| Match {
        start: Position::new(line, m.start()),
        len: m.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
