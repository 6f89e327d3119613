//! Editor: the single owned context.
//!
//! [`Editor`] ties the buffer, cursor, viewport, options, mode and command
//! line together and exposes the operations key handlers call. Every edit
//! clears the selection and hands the buffer the cursor as it was just
//! before the edit, so undo can put it back exactly.
//!
//! Nothing here scrolls implicitly. The event loop calls [`Editor::render`]
//! after each key, which scrolls first and then draws.

use std::path::Path;
use std::time::Instant;

use lined_term::DrawOp;

use crate::buffer::{DeleteAt, Document, TextBuffer};
use crate::command::{Command, CommandLine};
use crate::cursor::Cursor;
use crate::error::FileError;
use crate::file::{self, Saved};
use crate::mode::Mode;
use crate::options::Options;
use crate::position::Position;
use crate::render::{self, Frame};
use crate::search;
use crate::status::StatusMessage;
use crate::viewport::Viewport;

pub struct Editor {
    buffer: TextBuffer,
    cursor: Cursor,
    view: Viewport,
    options: Options,
    mode: Mode,
    command: CommandLine,
    message: Option<StatusMessage>,
}

impl Editor {
    /// An empty, unnamed document in a `rows` x `cols` text window.
    #[must_use]
    pub fn new(rows: usize, cols: usize, options: Options) -> Self {
        Self::from_buffer(TextBuffer::new(), rows, cols, options)
    }

    #[must_use]
    pub fn from_buffer(buffer: TextBuffer, rows: usize, cols: usize, options: Options) -> Self {
        let view = Viewport::new(rows, cols).with_min_gutter(options.min_gutter_width);
        Self {
            buffer,
            cursor: Cursor::new(),
            view,
            options,
            mode: Mode::Edit,
            command: CommandLine::new(),
            message: None,
        }
    }

    /// Load `path` and edit it.
    ///
    /// # Errors
    /// See [`file::load`].
    pub fn open(path: &Path, rows: usize, cols: usize, options: Options) -> Result<Self, FileError> {
        let buffer = file::load(path)?;
        Ok(Self::from_buffer(buffer, rows, cols, options))
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[inline]
    #[must_use]
    pub const fn doc(&self) -> &Document {
        self.buffer.doc()
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.view
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn command_line(&self) -> &CommandLine {
        &self.command
    }

    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// The current status message, if it has not expired at `now`.
    #[must_use]
    pub fn message(&self, now: Instant) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.visible_at(now, self.options.message_timeout()))
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn insert_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut utf8));
    }

    /// Insert `text` at the cursor and move past it.
    pub fn insert_str(&mut self, text: &str) {
        let before = self.begin_edit();
        let end = self.buffer.insert(text, before.pos(), before);
        self.cursor.set_pos(end, self.buffer.doc());
    }

    /// Split the line at the cursor.
    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    /// Backspace: remove the character before the cursor, or join with the
    /// previous line at column 0. Nothing happens at the document origin.
    pub fn delete_char(&mut self) {
        let before = self.begin_edit();
        let pos = before.pos();
        let target = if pos.col > 0 {
            DeleteAt::Before(pos)
        } else {
            DeleteAt::LineBreak(pos.line)
        };
        if let Some(at) = self.buffer.delete(target, before) {
            self.cursor.set_pos(at, self.buffer.doc());
        }
    }

    /// Remove the character under the cursor, or the line break at the end
    /// of the line. The cursor stays put.
    pub fn delete_forward(&mut self) {
        let before = self.begin_edit();
        let mut probe = before;
        probe.move_right(self.buffer.doc());
        let target = probe.pos();
        if target == before.pos() {
            return;
        }
        let at = if target.col > 0 {
            DeleteAt::Before(target)
        } else {
            DeleteAt::LineBreak(target.line)
        };
        if let Some(at) = self.buffer.delete(at, before) {
            self.cursor.set_pos(at, self.buffer.doc());
        }
    }

    /// Remove everything before the cursor on its line, one character at a
    /// time so each one undoes separately.
    pub fn delete_line_before_cursor(&mut self) {
        while self.cursor.x() > 0 {
            self.delete_char();
        }
    }

    /// Clear the selection and return the cursor to journal with the edit.
    fn begin_edit(&mut self) -> Cursor {
        self.cursor.select_clear();
        self.cursor.snap(self.buffer.doc());
        self.cursor
    }

    // -----------------------------------------------------------------------
    // Undo / redo
    // -----------------------------------------------------------------------

    /// Revert the last edit. False when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.buffer.undo() {
            Some(cursor) => {
                self.restore(cursor);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone edit. False when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.buffer.redo() {
            Some(cursor) => {
                self.restore(cursor);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.cursor.select_clear();
        self.cursor.snap(self.buffer.doc());
    }

    // -----------------------------------------------------------------------
    // Movement
    // -----------------------------------------------------------------------

    /// Run `motion`, extending the selection or dropping it.
    fn motion(&mut self, extend: bool, motion: impl FnOnce(&mut Cursor, &Document)) {
        let doc = self.buffer.doc();
        if extend {
            self.cursor.extend(doc, motion);
        } else {
            self.cursor.select_clear();
            motion(&mut self.cursor, doc);
        }
    }

    pub fn move_left(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_left);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_right);
    }

    pub fn move_up(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_up);
    }

    pub fn move_down(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_down);
    }

    pub fn move_word_left(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_word_left);
    }

    pub fn move_word_right(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_word_right);
    }

    pub fn move_begin(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_begin);
    }

    pub fn move_end(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_end);
    }

    pub fn move_top(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_top);
    }

    pub fn move_bottom(&mut self, extend: bool) {
        self.motion(extend, Cursor::move_bottom);
    }

    /// First line on screen.
    pub fn move_visible_top(&mut self, extend: bool) {
        let line = self.view.row_off();
        self.motion(extend, |c, doc| c.goto_line(line, doc));
    }

    /// Last line on screen, or the last line of a short document.
    pub fn move_visible_bottom(&mut self, extend: bool) {
        let line = self.view.last_visible_line();
        self.motion(extend, |c, doc| c.goto_line(line, doc));
    }

    /// Jump to `pos`, clamped, dropping any selection.
    pub fn set_cursor(&mut self, pos: Position) {
        self.motion(false, |c, doc| c.set_pos(pos, doc));
    }

    // -----------------------------------------------------------------------
    // Viewport and rendering
    // -----------------------------------------------------------------------

    /// Bring the cursor on screen and update where it is drawn.
    pub fn scroll(&mut self) {
        let count = self.buffer.line_count();
        self.view.scroll(self.cursor.x(), self.cursor.y(), count);
        self.cursor
            .set_render_x(self.view.screen_col(self.cursor.x(), count));
    }

    /// New text window size. Offsets are recomputed on the next scroll.
    pub const fn resize(&mut self, rows: usize, cols: usize) {
        self.view.resize(rows, cols);
    }

    /// Scroll, then draw the whole screen.
    pub fn render(&mut self, now: Instant) -> Vec<DrawOp> {
        self.scroll();
        let file_name = self.buffer.path().map(|p| p.to_string_lossy());
        let frame = Frame {
            doc: self.buffer.doc(),
            cursor: &self.cursor,
            view: &self.view,
            marker: &self.options.empty_line_marker,
            mode: self.mode,
            file_name: file_name.as_deref(),
            modified: self.buffer.is_modified(),
            message: self.message(now),
            command: self
                .mode
                .is_command()
                .then(|| (self.command.input(), self.command.cursor())),
        };
        render::render_frame(&frame)
    }

    // -----------------------------------------------------------------------
    // Search, messages, files
    // -----------------------------------------------------------------------

    /// Move to the next match of `pattern`. `Ok(false)` when nothing
    /// matches; the cursor is left alone.
    ///
    /// # Errors
    /// The regex error for an invalid pattern.
    pub fn search(&mut self, pattern: &str) -> Result<bool, regex::Error> {
        let found = search::search(self.buffer.doc(), pattern, self.cursor.pos())?;
        if let Some(m) = found {
            self.set_cursor(m.start);
        }
        Ok(found.is_some())
    }

    pub fn set_message(&mut self, text: impl Into<String>, now: Instant) {
        let message = StatusMessage::new(text, now);
        tracing::debug!(text = message.text(), "status message");
        self.message = Some(message);
    }

    /// Write the buffer. See [`file::save`].
    ///
    /// # Errors
    /// See [`file::save`].
    pub fn save(&mut self, target: Option<&Path>, overwrite: bool) -> Result<Saved, FileError> {
        file::save(&mut self.buffer, target, overwrite)
    }

    // -----------------------------------------------------------------------
    // Command mode
    // -----------------------------------------------------------------------

    pub fn enter_command_mode(&mut self) {
        self.command.clear();
        self.mode = Mode::Command;
    }

    pub fn leave_command_mode(&mut self) {
        self.command.clear();
        self.mode = Mode::Edit;
    }

    #[inline]
    pub const fn command_line_mut(&mut self) -> &mut CommandLine {
        &mut self.command
    }

    /// Parse the command line and return to edit mode.
    pub fn take_command(&mut self) -> Command {
        let command = self.command.parse();
        self.leave_command_mode();
        command
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_rows;
    use crate::testing::{REPOS, current, plain, rows};
    use pretty_assertions::assert_eq;

    const WIDTH: usize = 46;

    fn editor(text: &str) -> Editor {
        let buffer = TextBuffer::from_document(Document::from_text(text));
        Editor::from_buffer(buffer, 40, 50, Options::default())
    }

    fn repos() -> Editor {
        editor(REPOS)
    }

    /// Apply `op` `n` times, scrolling after each like the event loop does.
    fn times(ed: &mut Editor, n: usize, mut op: impl FnMut(&mut Editor)) {
        for _ in 0..n {
            op(ed);
            ed.scroll();
        }
    }

    fn typed(ed: &mut Editor, text: &str) {
        for ch in text.chars() {
            ed.insert_char(ch);
            ed.scroll();
        }
    }

    fn draw(ed: &mut Editor) -> Vec<String> {
        ed.scroll();
        let marker = ed.options().empty_line_marker.clone();
        rows(&render_rows(ed.doc(), ed.cursor(), ed.viewport(), &marker))
    }

    fn fixture_lines() -> Vec<String> {
        REPOS.split('\n').map(str::to_owned).collect()
    }

    /// Expected rows for `lines` with the cursor on `cursor_line`.
    fn expected(lines: &[String], cursor_line: usize) -> Vec<String> {
        let mut out: Vec<String> = lines
            .iter()
            .enumerate()
            .map(|(i, text)| {
                if i == cursor_line {
                    current(i + 1, text, WIDTH)
                } else {
                    plain(i + 1, text)
                }
            })
            .collect();
        while out.len() < 40 {
            out.push("~<clr>".to_owned());
        }
        out
    }

    // -- Basic editing -------------------------------------------------------

    fn basic_insert(ed: &mut Editor) {
        times(ed, 3, |e| e.move_right(false));
        typed(ed, "x");
        times(ed, 13, |e| e.move_right(false));
        typed(ed, "x");
        times(ed, 4, |e| e.move_word_right(false));
        times(ed, 2, |e| e.move_left(false));
        times(ed, 1, Editor::delete_char);
        times(ed, 1, Editor::insert_newline);
        typed(ed, "xxx");
        times(ed, 5, |e| e.move_left(false));
        times(ed, 1, Editor::insert_newline);
        times(ed, 22, |e| e.move_down(false));
        typed(ed, "yyy");
        times(ed, 3, |e| e.move_down(false));
        times(ed, 1, |e| e.move_end(false));
        typed(ed, "_zzz");
        times(ed, 1, |e| e.move_begin(false));
        typed(ed, "zzz_");
    }

    fn basic_insert_lines() -> Vec<String> {
        let mut lines = fixture_lines();
        lines[0] = "amaxteuros".to_owned();
        lines[2] = "bxolt".to_owned();
        lines.splice(3..4, ["c", "c", "xxxn"].map(str::to_owned));
        lines[26] = "yyyredis".to_owned();
        lines[29] = "zzz_v8_zzz".to_owned();
        lines
    }

    #[test]
    fn fixture_renders_unchanged() {
        let mut ed = repos();
        assert_eq!(draw(&mut ed), expected(&fixture_lines(), 0));
    }

    #[test]
    fn basic_insert_sequence() {
        let mut ed = repos();
        basic_insert(&mut ed);
        assert_eq!(ed.cursor().pos(), Position::new(29, 4));
        assert_eq!(draw(&mut ed), expected(&basic_insert_lines(), 29));
        assert!(ed.is_modified());
    }

    #[test]
    fn undo_chain_restores_fixture() {
        let mut ed = repos();
        basic_insert(&mut ed);
        assert_eq!(ed.buffer().history().undo_count(), 19);

        for _ in 0..19 {
            assert!(ed.undo());
        }
        assert!(!ed.undo());
        assert_eq!(ed.doc(), &Document::from_text(REPOS));
        assert_eq!(ed.cursor().pos(), Position::new(0, 3));
    }

    #[test]
    fn partial_undo_then_redo() {
        let mut ed = repos();
        basic_insert(&mut ed);
        for _ in 0..4 {
            ed.undo();
        }
        assert_eq!(ed.doc().line(29).map(|l| l.as_bytes()), Some(&b"v8_zzz"[..]));
        assert_eq!(ed.cursor().pos(), Position::new(29, 0));

        assert!(ed.redo());
        assert_eq!(ed.doc().line(29).map(|l| l.as_bytes()), Some(&b"zv8_zzz"[..]));
        assert_eq!(ed.cursor().pos(), Position::new(29, 0));
    }

    #[test]
    fn new_edit_drops_redo() {
        let mut ed = editor("ab");
        ed.move_end(false);
        ed.insert_char('c');
        ed.undo();
        ed.insert_char('d');
        assert!(!ed.redo());
        assert_eq!(ed.buffer().contents(), "abd");
    }

    // -- Horizontal scrolling ------------------------------------------------

    fn horizontal_shift(ed: &mut Editor) {
        ed.set_cursor(Position::new(27, 4));
        ed.scroll();
        times(ed, 2, |e| e.move_up(false));
        times(ed, 1, |e| e.move_end(false));
        typed(ed, &"x".repeat(20));
        typed(ed, &"y".repeat(36));
    }

    fn blank_rows(text_row: usize, text: String) -> Vec<String> {
        let mut out: Vec<String> = (0..38)
            .map(|i| if i == text_row { text.clone() } else { plain(i + 1, "") })
            .collect();
        out.push("~<clr>".to_owned());
        out.push("~<clr>".to_owned());
        out
    }

    #[test]
    fn long_line_scrolls_right() {
        let mut ed = repos();
        horizontal_shift(&mut ed);
        assert_eq!(ed.cursor().pos(), Position::new(25, 85));
        assert_eq!(ed.viewport().col_off(), 40);

        let row = format!("{}{}", "x".repeat(9), "y".repeat(36));
        assert_eq!(draw(&mut ed), blank_rows(25, current(26, &row, WIDTH)));
    }

    #[test]
    fn returning_to_column_zero_scrolls_back() {
        let mut ed = repos();
        horizontal_shift(&mut ed);
        times(&mut ed, 1, |e| e.move_begin(false));
        typed(&mut ed, "p");
        assert_eq!(ed.cursor().pos(), Position::new(25, 1));
        assert_eq!(ed.viewport().col_off(), 0);

        let rows = draw(&mut ed);
        let text = format!("pSQLite-2.5.0-for-code-reading{}", "x".repeat(16));
        assert_eq!(rows[25], current(26, &text, WIDTH));
        assert_eq!(rows[24], plain(25, "redis"));
    }

    // -- Selection -----------------------------------------------------------

    #[test]
    fn selection_across_lines_and_scroll() {
        let mut ed = repos();
        horizontal_shift(&mut ed);
        times(&mut ed, 1, |e| e.move_begin(false));
        typed(&mut ed, "p");
        let tail = "ite-2.5.0-for-code-reading";
        let xs16 = "x".repeat(16);

        times(&mut ed, 3, |e| e.move_right(true));
        let rows = draw(&mut ed);
        assert_eq!(rows[25], current(26, &format!("p<sel>SQL</>{tail}{xs16}"), WIDTH));

        times(&mut ed, 1, |e| e.move_down(true));
        assert_eq!(ed.cursor().pos(), Position::new(26, 4));
        let rows = draw(&mut ed);
        assert_eq!(rows[25], plain(26, &format!("p<sel>SQL{tail}{xs16}</>")));
        assert_eq!(rows[26], current(27, "<sel>trax</>xx", WIDTH));

        times(&mut ed, 5, |e| e.move_left(true));
        assert_eq!(ed.cursor().pos(), Position::new(25, 86));
        assert_eq!(ed.viewport().col_off(), 41);
        let rows = draw(&mut ed);
        let shifted = format!("<sel>{}{}</>", "x".repeat(9), "y".repeat(36));
        assert_eq!(rows[25], current(26, &shifted, WIDTH));
        assert_eq!(rows[26], plain(27, ""));

        times(&mut ed, 86, |e| e.move_left(true));
        times(&mut ed, 2, |e| e.move_left(true));
        assert_eq!(ed.cursor().pos(), Position::new(24, 4));
        let rows = draw(&mut ed);
        assert_eq!(rows[24], current(25, "redi<sel>s</>", WIDTH));
        assert_eq!(rows[25], plain(26, &format!("<sel>p</>SQL{tail}{xs16}")));
    }

    #[test]
    fn selection_clipped_to_visible_slice() {
        let mut ed = repos();
        ed.set_cursor(Position::new(27, 4));
        ed.move_up(false);
        ed.move_up(false);
        ed.move_end(false);
        for ch in "x".repeat(20).chars().chain("y".repeat(36).chars()) {
            ed.insert_char(ch);
        }
        ed.set_cursor(Position::new(25, 6));
        ed.move_right(true);
        ed.move_down(true);
        assert_eq!(ed.cursor().pos(), Position::new(26, 6));

        let rows = draw(&mut ed);
        assert_eq!(ed.viewport().col_off(), 0);
        let text = format!("SQLite<sel>-2.5.0-for-code-reading{}</>", "x".repeat(17));
        assert_eq!(rows[25], plain(26, &text));
        assert_eq!(rows[26], current(27, "<sel>traxxx</>", WIDTH));
    }

    #[test]
    fn plain_motion_drops_selection() {
        let mut ed = editor("hello");
        ed.move_right(true);
        ed.move_right(true);
        assert!(ed.cursor().is_selecting());
        ed.move_right(false);
        assert!(!ed.cursor().is_selecting());
    }

    #[test]
    fn edit_drops_selection() {
        let mut ed = editor("hello");
        ed.move_right(true);
        ed.insert_char('!');
        assert!(!ed.cursor().is_selecting());
        assert_eq!(ed.buffer().contents(), "h!ello");
    }

    // -- Scenarios -----------------------------------------------------------

    #[test]
    fn insert_then_append() {
        let mut ed = Editor::new(10, 40, Options::default());
        ed.insert_str("hello");
        ed.set_cursor(Position::new(0, 5));
        ed.insert_char('w');
        assert_eq!(ed.buffer().contents(), "hellow");
        assert_eq!(ed.cursor().x(), 6);
    }

    #[test]
    fn newline_splits_line() {
        let mut ed = editor("hello");
        ed.set_cursor(Position::new(0, 2));
        ed.insert_newline();
        assert_eq!(ed.buffer().contents(), "he\nllo");
        assert_eq!(ed.cursor().pos(), Position::new(1, 0));
    }

    #[test]
    fn backspace_at_origin_is_noop() {
        let mut ed = editor("hello");
        ed.delete_char();
        assert_eq!(ed.buffer().contents(), "hello");
        assert_eq!(ed.cursor().pos(), Position::ZERO);
        assert!(!ed.buffer().history().can_undo());
        assert!(!ed.is_modified());

        ed.set_cursor(Position::new(0, 5));
        ed.delete_char();
        assert_eq!(ed.buffer().contents(), "hell");
        assert_eq!(ed.cursor().x(), 4);
    }

    #[test]
    fn backspace_at_column_zero_joins() {
        let mut ed = editor("hell\nx");
        ed.set_cursor(Position::new(1, 0));
        ed.delete_char();
        assert_eq!(ed.buffer().contents(), "hellx");
        assert_eq!(ed.buffer().line_count(), 1);
        assert_eq!(ed.cursor().pos(), Position::new(0, 4));
    }

    #[test]
    fn multibyte_backspace_removes_whole_char() {
        let mut ed = editor("");
        ed.insert_str("aé");
        assert_eq!(ed.cursor().x(), 3);
        ed.delete_char();
        assert_eq!(ed.buffer().contents(), "a");
        assert_eq!(ed.cursor().x(), 1);
    }

    // -- Forward delete and Ctrl-U -------------------------------------------

    #[test]
    fn delete_forward_keeps_cursor() {
        let mut ed = editor("abc\ndef");
        ed.set_cursor(Position::new(0, 1));
        ed.delete_forward();
        assert_eq!(ed.buffer().contents(), "ac\ndef");
        assert_eq!(ed.cursor().pos(), Position::new(0, 1));

        ed.move_end(false);
        ed.delete_forward();
        assert_eq!(ed.buffer().contents(), "acdef");
        assert_eq!(ed.cursor().pos(), Position::new(0, 2));

        ed.undo();
        assert_eq!(ed.buffer().contents(), "ac\ndef");
        assert_eq!(ed.cursor().pos(), Position::new(0, 2));
    }

    #[test]
    fn delete_forward_at_end_is_noop() {
        let mut ed = editor("ab");
        ed.move_end(false);
        ed.delete_forward();
        assert_eq!(ed.buffer().contents(), "ab");
        assert!(!ed.buffer().history().can_undo());
    }

    #[test]
    fn delete_before_cursor_one_entry_per_char() {
        let mut ed = editor("one two\nnext");
        ed.set_cursor(Position::new(0, 4));
        ed.delete_line_before_cursor();
        assert_eq!(ed.buffer().contents(), "two\nnext");
        assert_eq!(ed.cursor().pos(), Position::ZERO);
        assert_eq!(ed.buffer().history().undo_count(), 4);

        ed.undo();
        assert_eq!(ed.buffer().contents(), "otwo\nnext");
    }

    // -- Visible top and bottom ----------------------------------------------

    #[test]
    fn visible_top_and_bottom() {
        let mut ed = repos();
        ed.resize(10, 50);
        ed.set_cursor(Position::new(15, 0));
        ed.scroll();
        assert_eq!(ed.viewport().row_off(), 6);

        ed.move_visible_top(false);
        assert_eq!(ed.cursor().y(), 6);
        ed.move_visible_bottom(false);
        assert_eq!(ed.cursor().y(), 15);
    }

    #[test]
    fn visible_bottom_stops_at_last_line() {
        let mut ed = editor("a\nb\nc");
        ed.move_visible_bottom(false);
        assert_eq!(ed.cursor().y(), 2);
    }

    #[test]
    fn render_x_follows_gutter_and_scroll() {
        let mut ed = editor("hello");
        ed.set_cursor(Position::new(0, 3));
        ed.scroll();
        assert_eq!(ed.cursor().render_x(), 7);
    }

    // -- Search --------------------------------------------------------------

    #[test]
    fn search_moves_cursor() {
        let mut ed = repos();
        assert!(ed.search("^v").unwrap());
        assert_eq!(ed.cursor().pos(), Position::new(27, 0));
        assert!(ed.search("^v").unwrap());
        assert_eq!(ed.cursor().pos(), Position::new(28, 0));
    }

    #[test]
    fn search_miss_keeps_cursor() {
        let mut ed = repos();
        ed.set_cursor(Position::new(3, 2));
        assert!(!ed.search("emacs").unwrap());
        assert_eq!(ed.cursor().pos(), Position::new(3, 2));
        assert!(ed.search("[").is_err());
    }

    // -- Messages and command mode -------------------------------------------

    #[test]
    fn message_expires() {
        let mut ed = editor("");
        let t0 = Instant::now();
        ed.set_message("hi", t0);
        assert_eq!(ed.message(t0), Some("hi"));
        assert_eq!(ed.message(t0 + ed.options().message_timeout()), None);
    }

    #[test]
    fn command_round_trip() {
        let mut ed = editor("");
        ed.enter_command_mode();
        assert_eq!(ed.mode(), Mode::Command);
        "q!".chars().for_each(|c| ed.command_line_mut().insert_char(c));
        assert_eq!(ed.take_command(), Command::Quit { force: true });
        assert_eq!(ed.mode(), Mode::Edit);
        assert!(ed.command_line().is_empty());
    }

    #[test]
    fn render_shows_command_line() {
        let mut ed = Editor::new(2, 20, Options::default());
        ed.enter_command_mode();
        "w".chars().for_each(|c| ed.command_line_mut().insert_char(c));
        let out = rows(&ed.render(Instant::now()));
        assert_eq!(out.last().map(String::as_str), Some(":w<clr><at 3,2><show>"));
    }

    // -- Files ---------------------------------------------------------------

    #[test]
    fn open_edit_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "alpha\nbeta\n").unwrap();

        let mut ed = Editor::open(&path, 10, 40, Options::default()).unwrap();
        assert!(!ed.undo());
        ed.move_down(false);
        ed.insert_str("new ");
        assert!(ed.is_modified());

        let saved = ed.save(None, false).unwrap();
        assert_eq!(saved.bytes, 15);
        assert!(!ed.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\nnew beta\n");

        ed.undo();
        assert!(ed.is_modified());
    }
}
