//! Text storage: the line-addressed [`Document`] and the [`TextBuffer`] that
//! journals every mutation of it.
//!
//! # Design choices
//!
//! - **Lines are owned byte vectors** in a `Vec`, addressed by index. Splits
//!   and joins shuffle whole `Line`s by index, so there is never a reference
//!   into a line that a later edit could invalidate.
//!
//! - **Columns are byte offsets.** Slicing a line can never panic on a
//!   char boundary and undo restores exactly the bytes it removed. Cursor
//!   movement and backspace step over whole UTF-8 sequences via
//!   [`Line::prev_boundary`] / [`Line::next_boundary`].
//!
//! - **A document always has at least one line.** Deleting everything leaves
//!   one empty line, never zero.
//!
//! - **`Document` knows nothing about history.** `TextBuffer` wraps it and
//!   records an [`EditRecord`] for every insert and delete.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cursor::Cursor;
use crate::history::{EditRecord, History};
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

/// One line of text, without its line terminator.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Line {
    text: Vec<u8>,
}

impl Line {
    #[must_use]
    pub const fn new() -> Self {
        Self { text: Vec::new() }
    }

    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self { text: bytes.into() }
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// The line as text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// Up to `len` bytes starting at `start`, clamped to the line.
    #[must_use]
    pub fn slice(&self, start: usize, len: usize) -> &[u8] {
        let start = start.min(self.text.len());
        let end = start.saturating_add(len).min(self.text.len());
        &self.text[start..end]
    }

    /// Column where the character ending at `col` begins.
    ///
    /// For ASCII this is `col - 1`; for a multi-byte character it is the
    /// column of its lead byte. Returns 0 at the start of the line.
    #[must_use]
    pub fn prev_boundary(&self, col: usize) -> usize {
        let col = col.min(self.text.len());
        if col == 0 {
            return 0;
        }
        let mut i = col - 1;
        while i > 0 && is_continuation(self.text[i]) {
            i -= 1;
        }
        i
    }

    /// Column just past the character starting at `col`.
    #[must_use]
    pub fn next_boundary(&self, col: usize) -> usize {
        let len = self.text.len();
        if col >= len {
            return len;
        }
        let mut i = col + 1;
        while i < len && is_continuation(self.text[i]) {
            i += 1;
        }
        i
    }
}

#[inline]
const fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({:?})", self.to_str_lossy())
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// The ordered lines of the open file. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// A document holding a single empty line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()],
        }
    }

    /// Split `text` on `\n` into lines. `""` gives one empty line.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(Line::from_bytes).collect(),
        }
    }

    // -- Access -------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    #[must_use]
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Byte length of line `idx`, or 0 past the end of the document.
    #[inline]
    #[must_use]
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, Line::len)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Position just past the last byte of the last line.
    #[must_use]
    pub fn end(&self) -> Position {
        let last = self.lines.len() - 1;
        Position::new(last, self.line_len(last))
    }

    /// Pull `pos` back inside the document.
    #[must_use]
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        Position::new(line, pos.col.min(self.line_len(line)))
    }

    /// All lines joined with `\n`, no trailing newline.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
            }
            out.extend_from_slice(line.as_bytes());
        }
        out
    }

    /// [`to_bytes`](Self::to_bytes) as text, invalid UTF-8 replaced.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }

    // -- Editing ------------------------------------------------------------

    /// Splice `text` in at `at` (clamped). Every `\n` in `text` starts a new
    /// line; the remainder of the original line follows the last segment.
    ///
    /// Returns the position just past the inserted text.
    pub fn insert(&mut self, at: Position, text: &[u8]) -> Position {
        let at = self.clamp(at);
        let mut segments = text.split(|&b| b == b'\n');
        let first = segments.next().unwrap_or_default();
        let mut new_lines: Vec<Line> = segments.map(Line::from_bytes).collect();

        let line = &mut self.lines[at.line];
        let tail = line.text.split_off(at.col);
        line.text.extend_from_slice(first);

        match new_lines.last_mut() {
            None => {
                line.text.extend_from_slice(&tail);
                Position::new(at.line, at.col + first.len())
            }
            Some(last) => {
                let end_col = last.len();
                last.text.extend_from_slice(&tail);
                let end_line = at.line + new_lines.len();
                let insert_at = at.line + 1;
                self.lines.splice(insert_at..insert_at, new_lines);
                Position::new(end_line, end_col)
            }
        }
    }

    /// Remove the span `range` (both ends clamped) and return its bytes,
    /// with `\n` for every line break crossed.
    pub fn remove(&mut self, range: Range) -> Vec<u8> {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start >= end {
            return Vec::new();
        }

        if start.line == end.line {
            return self.lines[start.line]
                .text
                .drain(start.col..end.col)
                .collect();
        }

        let mut removed = self.lines[start.line].text.split_off(start.col);
        for line in &self.lines[start.line + 1..end.line] {
            removed.push(b'\n');
            removed.extend_from_slice(line.as_bytes());
        }
        removed.push(b'\n');
        let last = &self.lines[end.line].text;
        removed.extend_from_slice(&last[..end.col]);
        let tail = last[end.col..].to_vec();

        self.lines[start.line].text.extend_from_slice(&tail);
        self.lines.drain(start.line + 1..=end.line);
        removed
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// DeleteAt
// ---------------------------------------------------------------------------

/// What a single delete removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAt {
    /// The character ending at this position's column (backspace).
    Before(Position),
    /// The line break joining this line to the previous one.
    LineBreak(usize),
}

impl DeleteAt {
    /// Map the `(x, y)` delete convention onto a target: `x == -1` means the
    /// line break before line `y`, `x >= 1` the character at `x - 1`.
    /// Anything else deletes nothing.
    #[must_use]
    pub fn from_sentinel(x: i64, y: usize) -> Option<Self> {
        match x {
            -1 => Some(Self::LineBreak(y)),
            x if x >= 1 => usize::try_from(x)
                .ok()
                .map(|col| Self::Before(Position::new(y, col))),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TextBuffer
// ---------------------------------------------------------------------------

/// A [`Document`] plus its undo journal, file path and modified flag.
///
/// Every mutating call takes the cursor as it was *before* the edit; that
/// snapshot is what undo hands back.
#[derive(Debug, Default)]
pub struct TextBuffer {
    doc: Document,
    history: History,
    path: Option<PathBuf>,
    modified: bool,
    /// A document of one empty line saves as `"\n"` instead of nothing.
    blank_line: bool,
}

impl TextBuffer {
    /// An empty, unmodified buffer with no path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing document. Starts unmodified with an empty journal.
    #[must_use]
    pub fn from_document(doc: Document) -> Self {
        Self {
            doc,
            ..Self::default()
        }
    }

    // -- Access -------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn doc(&self) -> &Document {
        &self.doc
    }

    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.doc.line_count()
    }

    #[inline]
    #[must_use]
    pub fn line_len(&self, idx: usize) -> usize {
        self.doc.line_len(idx)
    }

    #[must_use]
    pub fn contents(&self) -> String {
        self.doc.contents()
    }

    #[inline]
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` at `at` and journal it. Returns the position just past
    /// the inserted text. Empty text changes nothing and records nothing.
    pub fn insert(&mut self, text: &str, at: Position, cursor: Cursor) -> Position {
        self.insert_bytes(text.as_bytes(), at, cursor)
    }

    /// [`insert`](Self::insert) for raw bytes, used when loading files that
    /// are not valid UTF-8.
    pub fn insert_bytes(&mut self, text: &[u8], at: Position, cursor: Cursor) -> Position {
        let at = self.doc.clamp(at);
        if text.is_empty() {
            return at;
        }
        let end = self.doc.insert(at, text);
        tracing::debug!(?at, ?end, len = text.len(), "insert");
        self.history.record(EditRecord::insert(at, text.to_vec(), cursor));
        self.modified = true;
        end
    }

    /// Delete one character or one line break and journal it.
    ///
    /// Returns where the cursor belongs afterwards, or `None` when there was
    /// nothing to delete (column 0, line 0, or a line past the end).
    pub fn delete(&mut self, at: DeleteAt, cursor: Cursor) -> Option<Position> {
        let range = match at {
            DeleteAt::Before(pos) => {
                let pos = self.doc.clamp(pos);
                if pos.col == 0 {
                    return None;
                }
                let start = self.doc.line(pos.line)?.prev_boundary(pos.col);
                Range::ordered(Position::new(pos.line, start), pos)
            }
            DeleteAt::LineBreak(line) => {
                if line == 0 || line >= self.doc.line_count() {
                    return None;
                }
                let prev = line - 1;
                let join = Position::new(prev, self.doc.line_len(prev));
                Range::ordered(join, Position::new(line, 0))
            }
        };

        let removed = self.doc.remove(range);
        tracing::debug!(?range, len = removed.len(), "delete");
        self.history
            .record(EditRecord::delete(range.start, removed, cursor));
        self.modified = true;
        Some(range.start)
    }

    /// Revert the most recent edit. Returns the cursor saved with it.
    pub fn undo(&mut self) -> Option<Cursor> {
        let cursor = self.history.undo(&mut self.doc)?;
        self.modified = true;
        Some(cursor)
    }

    /// Re-apply the most recently undone edit. Returns the cursor saved
    /// with it.
    pub fn redo(&mut self) -> Option<Cursor> {
        let cursor = self.history.redo(&mut self.doc)?;
        self.modified = true;
        Some(cursor)
    }

    /// Forget all undo and redo entries.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // -- Metadata -----------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// True when the buffer changed since it was loaded or last saved.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    #[inline]
    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Whether a lone empty line is written as a line break. Set for
    /// buffers loaded from a non-empty file.
    #[inline]
    #[must_use]
    pub const fn keeps_blank_line(&self) -> bool {
        self.blank_line
    }

    #[inline]
    pub const fn set_keeps_blank_line(&mut self, keep: bool) {
        self.blank_line = keep;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
