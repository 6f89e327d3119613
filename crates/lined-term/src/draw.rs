// SPDX-License-Identifier: MIT
//
// Draw instructions and the painter.
//
// The editor core never writes escape bytes. It produces an ordered stream of
// `DrawOp`s describing what goes where, and the `Painter` turns that stream
// into ANSI bytes for the terminal. Keeping the stream as data means a frame
// can be compared in tests without parsing escape sequences back out.
//
// Highlights nest. The painter keeps a stack of active styles; ending a
// highlight resets SGR and re-applies whatever is still on the stack, so a
// selection span inside a current-line band returns to the band's
// background instead of the terminal default.
use std::fmt;
use std::io::{self, Write};

use crate::ansi;

// ─── Style ───────────────────────────────────────────────────────────────────

/// Visual style attached to a highlight span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Gutter number on the cursor's row.
    LineNumber,
    /// Background band across the cursor's row.
    CurrentLine,
    /// Selected text.
    Selection,
    /// Inverse-video status bar.
    StatusBar,
}

impl Style {
    /// Short name used in the compact textual form of a draw stream.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LineNumber => "num",
            Self::CurrentLine => "cur",
            Self::Selection => "sel",
            Self::StatusBar => "bar",
        }
    }

    fn apply(self, w: &mut impl Write) -> io::Result<()> {
        match self {
            Self::LineNumber => ansi::fg_256(w, 3),
            Self::CurrentLine => ansi::bg_256(w, 238),
            Self::Selection => ansi::bg_256(w, 218),
            Self::StatusBar => ansi::inverse(w),
        }
    }
}

// ─── DrawOp ──────────────────────────────────────────────────────────────────

/// One instruction in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// Place the terminal cursor. 0-indexed.
    MoveTo { row: u16, col: u16 },
    HideCursor,
    ShowCursor,
    BeginHighlight(Style),
    /// Close the innermost open highlight.
    EndHighlight,
    Text(String),
    /// Erase from the cursor to the end of the row.
    ClearLine,
    /// Finish the current row and move to the start of the next.
    EndRow,
}

impl DrawOp {
    /// Build a `Text` op from anything string-like.
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

/// Compact form: `<at r,c>`, `<hide>`, `<show>`, `<num>`, `</>`, `<clr>`,
/// `<eol>`; text is written verbatim.
impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo { row, col } => write!(f, "<at {row},{col}>"),
            Self::HideCursor => f.write_str("<hide>"),
            Self::ShowCursor => f.write_str("<show>"),
            Self::BeginHighlight(style) => write!(f, "<{}>", style.name()),
            Self::EndHighlight => f.write_str("</>"),
            Self::Text(s) => f.write_str(s),
            Self::ClearLine => f.write_str("<clr>"),
            Self::EndRow => f.write_str("<eol>"),
        }
    }
}

// ─── Painter ─────────────────────────────────────────────────────────────────

/// Translates `DrawOp` streams into escape bytes.
#[derive(Debug, Default)]
pub struct Painter {
    styles: Vec<Style>,
}

impl Painter {
    #[must_use]
    pub const fn new() -> Self {
        Self { styles: Vec::new() }
    }

    /// Number of highlights currently open.
    #[must_use]
    #[inline]
    pub fn depth(&self) -> usize {
        self.styles.len()
    }

    /// Encode `ops` into `w`. An unbalanced `EndHighlight` is ignored.
    ///
    /// # Errors
    /// Propagates write failures from `w`.
    pub fn paint(&mut self, w: &mut impl Write, ops: &[DrawOp]) -> io::Result<()> {
        for op in ops {
            self.paint_op(w, op)?;
        }
        Ok(())
    }

    fn paint_op(&mut self, w: &mut impl Write, op: &DrawOp) -> io::Result<()> {
        match op {
            DrawOp::MoveTo { row, col } => ansi::cursor_to(w, *col, *row),
            DrawOp::HideCursor => ansi::cursor_hide(w),
            DrawOp::ShowCursor => ansi::cursor_show(w),
            DrawOp::BeginHighlight(style) => {
                self.styles.push(*style);
                style.apply(w)
            }
            DrawOp::EndHighlight => {
                if self.styles.pop().is_none() {
                    return Ok(());
                }
                ansi::reset(w)?;
                for style in &self.styles {
                    style.apply(w)?;
                }
                Ok(())
            }
            DrawOp::Text(s) => w.write_all(s.as_bytes()),
            DrawOp::ClearLine => ansi::clear_line(w),
            DrawOp::EndRow => ansi::crlf(w),
        }
    }

    /// Close every open highlight. Called between frames so a truncated
    /// stream cannot leak colors into the next one.
    ///
    /// # Errors
    /// Propagates write failures from `w`.
    pub fn finish(&mut self, w: &mut impl Write) -> io::Result<()> {
        if self.styles.is_empty() {
            return Ok(());
        }
        self.styles.clear();
        ansi::reset(w)
    }
}

/// Render `ops` in compact form, one string.
#[must_use]
pub fn to_notation(ops: &[DrawOp]) -> String {
    use std::fmt::Write as _;
    let mut out = String::new();
    for op in ops {
        let _ = write!(out, "{op}");
    }
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
