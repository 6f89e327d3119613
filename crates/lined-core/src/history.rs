//! Undo/redo journal.
//!
//! Every content mutation is one [`EditRecord`]: what kind of edit it was,
//! where it happened, the exact bytes involved, and the cursor as it stood
//! just before the edit. Records are applied in either direction directly to
//! a [`Document`]:
//!
//! - **Insert**: undo removes the inserted span, redo inserts it again.
//! - **Delete**: undo inserts the removed bytes back, redo removes them.
//!
//! A joined line break is a `Delete` whose text is `"\n"`, so joins and
//! splits need no special casing.
//!
//! Replaying a record never journals anything new. Recording a fresh edit
//! drops the redo stack.

use std::fmt;

use crate::buffer::Document;
use crate::cursor::Cursor;
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// EditRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
}

/// One reversible edit plus the cursor that preceded it.
#[derive(Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub kind: EditKind,
    /// Where the text starts.
    pub at: Position,
    pub text: Vec<u8>,
    /// Cursor immediately before the edit.
    pub cursor: Cursor,
}

impl EditRecord {
    #[must_use]
    pub const fn insert(at: Position, text: Vec<u8>, cursor: Cursor) -> Self {
        Self {
            kind: EditKind::Insert,
            at,
            text,
            cursor,
        }
    }

    #[must_use]
    pub const fn delete(at: Position, text: Vec<u8>, cursor: Cursor) -> Self {
        Self {
            kind: EditKind::Delete,
            at,
            text,
            cursor,
        }
    }

    /// The span `text` occupies when present in the document.
    fn span(&self) -> Range {
        Range::ordered(self.at, end_after_insert(self.at, &self.text))
    }

    /// Take the edit back out of `doc`.
    fn revert(&self, doc: &mut Document) {
        match self.kind {
            EditKind::Insert => {
                doc.remove(self.span());
            }
            EditKind::Delete => {
                doc.insert(self.at, &self.text);
            }
        }
    }

    /// Perform the edit on `doc` again.
    fn replay(&self, doc: &mut Document) {
        match self.kind {
            EditKind::Insert => {
                doc.insert(self.at, &self.text);
            }
            EditKind::Delete => {
                doc.remove(self.span());
            }
        }
    }
}

impl fmt::Debug for EditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditRecord")
            .field("kind", &self.kind)
            .field("at", &self.at)
            .field("text", &String::from_utf8_lossy(&self.text))
            .field("cursor", &self.cursor.pos())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Undo and redo stacks.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<EditRecord>,
    redo_stack: Vec<EditRecord>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Journal an edit that has already been applied. Clears redo.
    pub fn record(&mut self, record: EditRecord) {
        self.redo_stack.clear();
        self.undo_stack.push(record);
    }

    /// Revert the newest edit in `doc`. Returns its saved cursor, or `None`
    /// when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut Document) -> Option<Cursor> {
        let record = self.undo_stack.pop()?;
        record.revert(doc);
        tracing::debug!(?record, "undo");
        let cursor = record.cursor;
        self.redo_stack.push(record);
        Some(cursor)
    }

    /// Re-apply the newest undone edit in `doc`. Returns its saved cursor,
    /// or `None` when there is nothing to redo.
    pub fn redo(&mut self, doc: &mut Document) -> Option<Cursor> {
        let record = self.redo_stack.pop()?;
        record.replay(doc);
        tracing::debug!(?record, "redo");
        let cursor = record.cursor;
        self.undo_stack.push(record);
        Some(cursor)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Position just past `text` if it were inserted at `start`.
fn end_after_insert(start: Position, text: &[u8]) -> Position {
    let breaks = text.iter().filter(|&&b| b == b'\n').count();
    match text.iter().rposition(|&b| b == b'\n') {
        None => Position::new(start.line, start.col + text.len()),
        Some(last) => Position::new(start.line + breaks, text.len() - last - 1),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cursor_at(x: usize, y: usize) -> Cursor {
        Cursor::at(Position::new(y, x))
    }

    /// Apply an insert to `doc` and journal it, the way `TextBuffer` does.
    fn insert(h: &mut History, doc: &mut Document, at: Position, text: &str, cursor: Cursor) {
        doc.insert(at, text.as_bytes());
        h.record(EditRecord::insert(at, text.as_bytes().to_vec(), cursor));
    }

    // -- end_after_insert ---------------------------------------------------

    #[test]
    fn end_after_insert_no_newline() {
        assert_eq!(end_after_insert(Position::new(3, 5), b"hi"), Position::new(3, 7));
    }

    #[test]
    fn end_after_insert_with_newline() {
        assert_eq!(
            end_after_insert(Position::new(3, 5), b"hi\nthere"),
            Position::new(4, 5)
        );
    }

    #[test]
    fn end_after_insert_trailing_newline() {
        assert_eq!(end_after_insert(Position::ZERO, b"hello\n"), Position::new(1, 0));
    }

    #[test]
    fn end_after_insert_multiple_newlines() {
        assert_eq!(end_after_insert(Position::ZERO, b"a\nb\nc"), Position::new(2, 1));
    }

    #[test]
    fn end_after_insert_empty() {
        assert_eq!(end_after_insert(Position::new(2, 3), b""), Position::new(2, 3));
    }

    // -- Undo ---------------------------------------------------------------

    #[test]
    fn undo_insert() {
        let mut doc = Document::new();
        let mut h = History::new();
        insert(&mut h, &mut doc, Position::ZERO, "hello", cursor_at(0, 0));

        assert_eq!(h.undo(&mut doc), Some(cursor_at(0, 0)));
        assert_eq!(doc.contents(), "");
        assert!(!h.can_undo());
        assert!(h.can_redo());
    }

    #[test]
    fn undo_delete_restores_bytes() {
        let mut doc = Document::from_text("hello");
        let mut h = History::new();
        let at = Position::new(0, 4);
        let removed = doc.remove(Range::ordered(at, Position::new(0, 5)));
        h.record(EditRecord::delete(at, removed, cursor_at(5, 0)));
        assert_eq!(doc.contents(), "hell");

        assert_eq!(h.undo(&mut doc), Some(cursor_at(5, 0)));
        assert_eq!(doc.contents(), "hello");
    }

    #[test]
    fn undo_multiline_insert() {
        let mut doc = Document::from_text("top\nbottom");
        let mut h = History::new();
        insert(&mut h, &mut doc, Position::new(0, 3), "\none\ntwo", cursor_at(3, 0));
        assert_eq!(doc.line_count(), 4);

        h.undo(&mut doc);
        assert_eq!(doc.contents(), "top\nbottom");
    }

    #[test]
    fn undo_chain_in_reverse_order() {
        let mut doc = Document::new();
        let mut h = History::new();
        insert(&mut h, &mut doc, Position::new(0, 0), "a", cursor_at(0, 0));
        insert(&mut h, &mut doc, Position::new(0, 1), "b", cursor_at(1, 0));
        insert(&mut h, &mut doc, Position::new(0, 2), "c", cursor_at(2, 0));

        assert_eq!(h.undo(&mut doc), Some(cursor_at(2, 0)));
        assert_eq!(doc.contents(), "ab");
        assert_eq!(h.undo(&mut doc), Some(cursor_at(1, 0)));
        assert_eq!(h.undo(&mut doc), Some(cursor_at(0, 0)));
        assert_eq!(doc.contents(), "");
        assert_eq!(h.undo(&mut doc), None);
    }

    // -- Redo ---------------------------------------------------------------

    #[test]
    fn redo_returns_saved_cursor() {
        let mut doc = Document::new();
        let mut h = History::new();
        insert(&mut h, &mut doc, Position::ZERO, "x", cursor_at(0, 0));
        h.undo(&mut doc);

        assert_eq!(h.redo(&mut doc), Some(cursor_at(0, 0)));
        assert_eq!(doc.contents(), "x");
        assert_eq!(h.undo_count(), 1);
        assert_eq!(h.redo_count(), 0);
    }

    #[test]
    fn redo_of_join() {
        let mut doc = Document::from_text("ab\ncd");
        let mut h = History::new();
        let at = Position::new(0, 2);
        let removed = doc.remove(Range::ordered(at, Position::new(1, 0)));
        assert_eq!(removed, b"\n");
        h.record(EditRecord::delete(at, removed, cursor_at(0, 1)));

        h.undo(&mut doc);
        assert_eq!(doc.contents(), "ab\ncd");
        h.redo(&mut doc);
        assert_eq!(doc.contents(), "abcd");
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut doc = Document::new();
        let mut h = History::new();
        insert(&mut h, &mut doc, Position::ZERO, "a", cursor_at(0, 0));
        h.undo(&mut doc);
        assert!(h.can_redo());

        insert(&mut h, &mut doc, Position::ZERO, "b", cursor_at(0, 0));
        assert!(!h.can_redo());
        assert_eq!(h.redo(&mut doc), None);
    }

    #[test]
    fn replay_does_not_grow_history() {
        let mut doc = Document::new();
        let mut h = History::new();
        insert(&mut h, &mut doc, Position::ZERO, "a", cursor_at(0, 0));
        for _ in 0..3 {
            h.undo(&mut doc);
            h.redo(&mut doc);
        }
        assert_eq!(h.undo_count() + h.redo_count(), 1);
    }

    #[test]
    fn clear_drops_both_stacks() {
        let mut doc = Document::new();
        let mut h = History::new();
        insert(&mut h, &mut doc, Position::ZERO, "a", cursor_at(0, 0));
        insert(&mut h, &mut doc, Position::new(0, 1), "b", cursor_at(1, 0));
        h.undo(&mut doc);
        h.clear();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }
}
