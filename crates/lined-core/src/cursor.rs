//! Cursor: position, movement, and selection.
//!
//! The `Cursor` is a small `Copy` value. It never holds a reference to the
//! document; every movement takes the [`Document`] as a parameter and clamps
//! against it, so a cursor can never point outside the text once it has been
//! moved.
//!
//! # Movement
//!
//! - Horizontal moves wrap: left at column 0 lands at the end of the
//!   previous line, right at the end of a line lands at the start of the
//!   next one.
//! - Word moves scan within the current line (see [`crate::word`]); at a line
//!   edge they wrap like a plain horizontal move.
//! - Vertical moves keep a sticky column. Passing through a short line and
//!   reaching a long one again restores the original column. Any horizontal
//!   move resets it.
//!
//! # Selection
//!
//! Selection is an anchor plus an offset. [`Cursor::extend`] wraps any
//! movement: the first extend while inactive drops the anchor at the current
//! position, and every extend leaves the offset where the movement ended.
//! [`Cursor::selection_range`] answers "which columns of row `r` are
//! selected" for the renderer.

use std::ops::RangeInclusive;

use crate::buffer::Document;
use crate::position::Position;
use crate::word;

/// A cursor in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: Position,

    /// Screen column the terminal cursor is drawn at. Display only.
    render_x: usize,

    /// Column vertical movement tries to return to.
    sticky_col: usize,

    select_anchor: Position,
    select_offset: Position,
    select_active: bool,
}

impl Cursor {
    /// A cursor at the origin with no selection.
    #[must_use]
    pub const fn new() -> Self {
        Self::at(Position::ZERO)
    }

    /// A cursor at `pos` with no selection.
    #[must_use]
    pub const fn at(pos: Position) -> Self {
        Self {
            pos,
            render_x: 0,
            sticky_col: pos.col,
            select_anchor: Position::ZERO,
            select_offset: Position::ZERO,
            select_active: false,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn pos(&self) -> Position {
        self.pos
    }

    /// Column.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> usize {
        self.pos.col
    }

    /// Row.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> usize {
        self.pos.line
    }

    #[inline]
    #[must_use]
    pub const fn render_x(&self) -> usize {
        self.render_x
    }

    #[inline]
    pub const fn set_render_x(&mut self, render_x: usize) {
        self.render_x = render_x;
    }

    #[inline]
    #[must_use]
    pub const fn sticky_col(&self) -> usize {
        self.sticky_col
    }

    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> Position {
        self.select_anchor
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> Position {
        self.select_offset
    }

    #[inline]
    #[must_use]
    pub const fn is_selecting(&self) -> bool {
        self.select_active
    }

    // -- Direct positioning -------------------------------------------------

    /// Jump to `pos`, clamped. Resets the sticky column.
    pub fn set_pos(&mut self, pos: Position, doc: &Document) {
        self.pos = doc.clamp(pos);
        self.sticky_col = self.pos.col;
    }

    /// Pull the cursor back inside the document after the text under it
    /// changed. Keeps the sticky column.
    pub fn snap(&mut self, doc: &Document) {
        self.pos = doc.clamp(self.pos);
    }

    /// Move to `line`, aiming for the sticky column.
    pub fn goto_line(&mut self, line: usize, doc: &Document) {
        let line = line.min(doc.line_count() - 1);
        self.pos = Position::new(line, self.sticky_col.min(doc.line_len(line)));
    }

    // -- Horizontal movement ------------------------------------------------

    /// One character left, wrapping to the end of the previous line.
    pub fn move_left(&mut self, doc: &Document) {
        let Position { line, col } = doc.clamp(self.pos);
        let target = match doc.line(line) {
            Some(l) if col > 0 => Position::new(line, l.prev_boundary(col)),
            _ if line > 0 => Position::new(line - 1, doc.line_len(line - 1)),
            _ => Position::new(line, col),
        };
        self.set_pos(target, doc);
    }

    /// One character right, wrapping to the start of the next line.
    pub fn move_right(&mut self, doc: &Document) {
        let Position { line, col } = doc.clamp(self.pos);
        let target = match doc.line(line) {
            Some(l) if col < l.len() => Position::new(line, l.next_boundary(col)),
            _ if line + 1 < doc.line_count() => Position::new(line + 1, 0),
            _ => Position::new(line, col),
        };
        self.set_pos(target, doc);
    }

    /// Start of the previous word on this line, or wrap when at column 0.
    pub fn move_word_left(&mut self, doc: &Document) {
        let Position { line, col } = doc.clamp(self.pos);
        match doc.line(line) {
            Some(l) if col > 0 => self.set_pos(Position::new(line, word::scan_left(l, col)), doc),
            _ => self.move_left(doc),
        }
    }

    /// Start of the next word on this line, or wrap when at the line end.
    pub fn move_word_right(&mut self, doc: &Document) {
        let Position { line, col } = doc.clamp(self.pos);
        match doc.line(line) {
            Some(l) if col < l.len() => {
                self.set_pos(Position::new(line, word::scan_right(l, col)), doc);
            }
            _ => self.move_right(doc),
        }
    }

    /// Column 0 of the current line.
    pub fn move_begin(&mut self, doc: &Document) {
        self.set_pos(Position::new(self.pos.line, 0), doc);
    }

    /// End of the current line.
    pub fn move_end(&mut self, doc: &Document) {
        let line = self.pos.line;
        self.set_pos(Position::new(line, doc.line_len(line)), doc);
    }

    // -- Vertical movement --------------------------------------------------

    pub fn move_up(&mut self, doc: &Document) {
        if self.pos.line > 0 {
            self.goto_line(self.pos.line - 1, doc);
        }
    }

    pub fn move_down(&mut self, doc: &Document) {
        if self.pos.line + 1 < doc.line_count() {
            self.goto_line(self.pos.line + 1, doc);
        }
    }

    /// First line of the document.
    pub fn move_top(&mut self, doc: &Document) {
        self.goto_line(0, doc);
    }

    /// Last line of the document.
    pub fn move_bottom(&mut self, doc: &Document) {
        self.goto_line(doc.line_count() - 1, doc);
    }

    // -- Selection ----------------------------------------------------------

    /// Run `motion` as a selection-extending movement.
    ///
    /// ```
    /// use lined_core::buffer::Document;
    /// use lined_core::cursor::Cursor;
    ///
    /// let doc = Document::from_text("hello");
    /// let mut cursor = Cursor::new();
    /// cursor.extend(&doc, Cursor::move_right);
    /// cursor.extend(&doc, Cursor::move_right);
    /// assert_eq!(cursor.selection_range(0, 5), Some(0..=1));
    /// ```
    pub fn extend(&mut self, doc: &Document, motion: impl FnOnce(&mut Self, &Document)) {
        if !self.select_active {
            self.select_active = true;
            self.select_anchor = self.pos;
        }
        motion(self, doc);
        self.select_offset = self.pos;
    }

    /// Drop the selection and reset both endpoints.
    pub const fn select_clear(&mut self) {
        self.select_active = false;
        self.select_anchor = Position::ZERO;
        self.select_offset = Position::ZERO;
    }

    /// True when the anchor is at or before the offset.
    #[must_use]
    pub fn is_select_ltr(&self) -> bool {
        self.select_anchor <= self.select_offset
    }

    /// The selected columns of document row `row`, whose length is `len`.
    ///
    /// The result is always within `0..len` and never inverted; `None` means
    /// nothing on this row is selected.
    #[must_use]
    pub fn selection_range(&self, row: usize, len: usize) -> Option<RangeInclusive<usize>> {
        if !self.select_active || len == 0 {
            return None;
        }
        let (start, end) = if self.is_select_ltr() {
            (self.select_anchor, self.select_offset)
        } else {
            (self.select_offset, self.select_anchor)
        };

        let last = len - 1;
        let (lo, hi) = if row == start.line && row == end.line {
            (start.col, end.col.checked_sub(1)?)
        } else if row == start.line {
            (start.col, last)
        } else if row == end.line {
            (0, end.col.checked_sub(1)?)
        } else if start.line < row && row < end.line {
            (0, last)
        } else {
            return None;
        };

        let hi = hi.min(last);
        (lo <= hi).then_some(lo..=hi)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::from_text("hello world\nhi\n\nlonger line here")
    }

    fn at(x: usize, y: usize) -> Cursor {
        Cursor::at(Position::new(y, x))
    }

    fn select(anchor: (usize, usize), offset: (usize, usize)) -> Cursor {
        let mut c = at(anchor.0, anchor.1);
        c.select_active = true;
        c.select_anchor = Position::new(anchor.1, anchor.0);
        c.select_offset = Position::new(offset.1, offset.0);
        c.pos = c.select_offset;
        c
    }

    // -- Horizontal ---------------------------------------------------------

    #[test]
    fn left_within_line() {
        let d = doc();
        let mut c = at(3, 0);
        c.move_left(&d);
        assert_eq!(c.pos(), Position::new(0, 2));
    }

    #[test]
    fn left_wraps_to_previous_line_end() {
        let d = doc();
        let mut c = at(0, 1);
        c.move_left(&d);
        assert_eq!(c.pos(), Position::new(0, 11));
    }

    #[test]
    fn left_at_origin_stays() {
        let d = doc();
        let mut c = Cursor::new();
        c.move_left(&d);
        assert_eq!(c.pos(), Position::ZERO);
    }

    #[test]
    fn right_wraps_to_next_line_start() {
        let d = doc();
        let mut c = at(2, 1);
        c.move_right(&d);
        assert_eq!(c.pos(), Position::new(2, 0));
    }

    #[test]
    fn right_at_document_end_stays() {
        let d = doc();
        let mut c = at(16, 3);
        c.move_right(&d);
        assert_eq!(c.pos(), Position::new(3, 16));
    }

    #[test]
    fn begin_and_end() {
        let d = doc();
        let mut c = at(4, 0);
        c.move_end(&d);
        assert_eq!(c.x(), 11);
        c.move_begin(&d);
        assert_eq!(c.x(), 0);
    }

    // -- Words --------------------------------------------------------------

    #[test]
    fn word_right_then_wrap() {
        let d = doc();
        let mut c = at(0, 0);
        c.move_word_right(&d);
        assert_eq!(c.pos(), Position::new(0, 6));
        c.move_word_right(&d);
        assert_eq!(c.pos(), Position::new(0, 11));
        c.move_word_right(&d);
        assert_eq!(c.pos(), Position::new(1, 0));
    }

    #[test]
    fn word_left_then_wrap() {
        let d = doc();
        let mut c = at(2, 1);
        c.move_word_left(&d);
        assert_eq!(c.pos(), Position::new(1, 0));
        c.move_word_left(&d);
        assert_eq!(c.pos(), Position::new(0, 11));
        c.move_word_left(&d);
        assert_eq!(c.pos(), Position::new(0, 6));
    }

    // -- Vertical -----------------------------------------------------------

    #[test]
    fn vertical_clamps_to_short_line() {
        let d = doc();
        let mut c = at(9, 0);
        c.move_down(&d);
        assert_eq!(c.pos(), Position::new(1, 2));
    }

    #[test]
    fn sticky_column_survives_short_lines() {
        let d = doc();
        let mut c = at(9, 0);
        c.move_down(&d);
        c.move_down(&d);
        assert_eq!(c.pos(), Position::new(2, 0));
        c.move_down(&d);
        assert_eq!(c.pos(), Position::new(3, 9));
    }

    #[test]
    fn horizontal_move_resets_sticky() {
        let d = doc();
        let mut c = at(9, 0);
        c.move_down(&d);
        c.move_left(&d);
        c.move_up(&d);
        assert_eq!(c.pos(), Position::new(0, 1));
    }

    #[test]
    fn vertical_stops_at_document_edges() {
        let d = doc();
        let mut c = at(1, 0);
        c.move_up(&d);
        assert_eq!(c.pos(), Position::new(0, 1));
        c.move_bottom(&d);
        assert_eq!(c.y(), 3);
        c.move_down(&d);
        assert_eq!(c.y(), 3);
        c.move_top(&d);
        assert_eq!(c.y(), 0);
    }

    #[test]
    fn snap_pulls_back_inside() {
        let d = Document::from_text("ab");
        let mut c = at(9, 4);
        c.snap(&d);
        assert_eq!(c.pos(), Position::new(0, 2));
    }

    // -- Selection state ----------------------------------------------------

    #[test]
    fn first_extend_sets_anchor() {
        let d = doc();
        let mut c = at(2, 0);
        c.extend(&d, Cursor::move_right);
        assert!(c.is_selecting());
        assert_eq!(c.anchor(), Position::new(0, 2));
        assert_eq!(c.offset(), Position::new(0, 3));

        c.extend(&d, Cursor::move_down);
        assert_eq!(c.anchor(), Position::new(0, 2));
        assert_eq!(c.offset(), Position::new(1, 2));
    }

    #[test]
    fn select_clear_resets() {
        let d = doc();
        let mut c = at(2, 0);
        c.extend(&d, Cursor::move_right);
        c.select_clear();
        assert!(!c.is_selecting());
        assert_eq!(c.anchor(), Position::ZERO);
        assert_eq!(c.offset(), Position::ZERO);
        assert_eq!(c.selection_range(0, 11), None);
    }

    #[test]
    fn ltr_is_lexicographic() {
        assert!(select((5, 0), (1, 1)).is_select_ltr());
        assert!(!select((1, 1), (5, 0)).is_select_ltr());
        assert!(select((3, 2), (3, 2)).is_select_ltr());
    }

    // -- Selection ranges ---------------------------------------------------

    #[test]
    fn single_line_range_is_min_to_max_minus_one() {
        assert_eq!(select((2, 0), (6, 0)).selection_range(0, 11), Some(2..=5));
        assert_eq!(select((6, 0), (2, 0)).selection_range(0, 11), Some(2..=5));
    }

    #[test]
    fn empty_selection_has_no_range() {
        assert_eq!(select((4, 0), (4, 0)).selection_range(0, 11), None);
        assert_eq!(select((0, 0), (0, 0)).selection_range(0, 11), None);
    }

    #[test]
    fn multi_line_ltr() {
        let c = select((3, 1), (2, 4));
        assert_eq!(c.selection_range(0, 10), None);
        assert_eq!(c.selection_range(1, 10), Some(3..=9));
        assert_eq!(c.selection_range(2, 7), Some(0..=6));
        assert_eq!(c.selection_range(3, 4), Some(0..=3));
        assert_eq!(c.selection_range(4, 10), Some(0..=1));
        assert_eq!(c.selection_range(5, 10), None);
    }

    #[test]
    fn multi_line_rtl_mirrors() {
        let c = select((1, 25), (4, 24));
        assert_eq!(c.selection_range(24, 5), Some(4..=4));
        assert_eq!(c.selection_range(25, 86), Some(0..=0));
    }

    #[test]
    fn offset_past_short_line_is_clamped() {
        let c = select((6, 25), (7, 26));
        assert_eq!(c.selection_range(26, 6), Some(0..=5));
    }

    #[test]
    fn anchor_past_line_end_selects_nothing() {
        let c = select((9, 0), (2, 1));
        assert_eq!(c.selection_range(0, 4), None);
    }

    #[test]
    fn offset_at_column_zero_selects_nothing_on_its_row() {
        let c = select((3, 0), (0, 1));
        assert_eq!(c.selection_range(1, 5), None);
        assert_eq!(c.selection_range(0, 8), Some(3..=7));
    }

    #[test]
    fn empty_line_has_no_range() {
        assert_eq!(select((0, 0), (3, 2)).selection_range(1, 0), None);
    }
}
