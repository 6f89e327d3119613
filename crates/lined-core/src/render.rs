//! Frame composition.
//!
//! Turns a document, cursor and viewport into the ordered [`DrawOp`] stream
//! the terminal painter consumes. Nothing here mutates state: the caller
//! scrolls the viewport first, then renders.
//!
//! A text row is laid out as
//!
//! ```text
//! <num> 26 </><cur>trax<sel>xx</>      </><clr><eol>    cursor's row
//!  25 p<sel>SQLite-2.5.0</><clr><eol>                   any other row
//! ~<clr><eol>                                           past the end
//! ```
//!
//! Only the cursor's row gets the highlighted number and the padded
//! background band. A selection span is clipped to the visible slice of the
//! line; an empty intersection emits no highlight at all.

use std::ops::{Range, RangeInclusive};

use lined_term::{DrawOp, Style};

use crate::buffer::{Document, Line};
use crate::cursor::Cursor;
use crate::mode::Mode;
use crate::viewport::Viewport;

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Everything one frame needs, borrowed from the editor.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub doc: &'a Document,
    pub cursor: &'a Cursor,
    pub view: &'a Viewport,
    /// Drawn on rows past the end of the document.
    pub marker: &'a str,
    pub mode: Mode,
    pub file_name: Option<&'a str>,
    pub modified: bool,
    /// Status message, already filtered for age.
    pub message: Option<&'a str>,
    /// Command-line input and its cursor column, in command mode.
    pub command: Option<(&'a str, usize)>,
}

/// The full frame: text rows, status bar, message row, then the terminal
/// cursor placed where input goes.
#[must_use]
pub fn render_frame(frame: &Frame<'_>) -> Vec<DrawOp> {
    let view = frame.view;
    let mut out = Vec::with_capacity(view.rows() * 8 + 16);
    out.push(DrawOp::HideCursor);
    out.push(DrawOp::MoveTo { row: 0, col: 0 });

    push_rows(&mut out, frame.doc, frame.cursor, view, frame.marker);

    let info = StatusInfo {
        mode: frame.mode,
        file_name: frame.file_name,
        modified: frame.modified,
        line: frame.cursor.y(),
        col: frame.cursor.x(),
    };
    out.push(DrawOp::BeginHighlight(Style::StatusBar));
    push_str(&mut out, &status_bar(&info, view.cols()));
    out.push(DrawOp::EndHighlight);
    out.push(DrawOp::EndRow);

    let (row, col) = match frame.command {
        Some((input, at)) => {
            let line = format!(":{input}");
            push_str(&mut out, &truncate(&line, view.cols()));
            (view.rows() + 1, 1 + at)
        }
        None => {
            if let Some(message) = frame.message {
                push_str(&mut out, &truncate(message, view.cols()));
            }
            (view.screen_row(frame.cursor.y()), frame.cursor.render_x())
        }
    };
    out.push(DrawOp::ClearLine);

    out.push(DrawOp::MoveTo {
        row: cell(row),
        col: cell(col),
    });
    out.push(DrawOp::ShowCursor);
    out
}

// ---------------------------------------------------------------------------
// Text rows
// ---------------------------------------------------------------------------

/// Draw ops for the viewport's text rows only.
#[must_use]
pub fn render_rows(doc: &Document, cursor: &Cursor, view: &Viewport, marker: &str) -> Vec<DrawOp> {
    let mut out = Vec::with_capacity(view.rows() * 8);
    push_rows(&mut out, doc, cursor, view, marker);
    out
}

fn push_rows(out: &mut Vec<DrawOp>, doc: &Document, cursor: &Cursor, view: &Viewport, marker: &str) {
    let line_count = doc.line_count();
    let layout = RowLayout {
        gutter: view.gutter(line_count),
        width: view.visible_width(line_count),
        col_off: view.col_off(),
    };
    for screen_row in 0..view.rows() {
        let idx = view.row_off() + screen_row;
        match doc.line(idx) {
            Some(line) => push_line(out, idx, line, cursor, layout),
            None => push_str(out, marker),
        }
        out.push(DrawOp::ClearLine);
        out.push(DrawOp::EndRow);
    }
}

#[derive(Debug, Clone, Copy)]
struct RowLayout {
    gutter: usize,
    width: usize,
    col_off: usize,
}

fn push_line(out: &mut Vec<DrawOp>, idx: usize, line: &Line, cursor: &Cursor, layout: RowLayout) {
    let RowLayout {
        gutter,
        width,
        col_off,
    } = layout;
    let current = idx == cursor.y();
    let number = format!("{:>gutter$} ", idx + 1);

    if current {
        out.push(DrawOp::BeginHighlight(Style::LineNumber));
        out.push(DrawOp::Text(number));
        out.push(DrawOp::EndHighlight);
        out.push(DrawOp::BeginHighlight(Style::CurrentLine));
    } else {
        out.push(DrawOp::Text(number));
    }

    let visible = line.slice(col_off, width);
    let selected = cursor
        .selection_range(idx, line.len())
        .and_then(|range| clip(&range, col_off, visible.len()));
    match selected {
        Some(sel) => {
            push_bytes(out, &visible[..sel.start]);
            out.push(DrawOp::BeginHighlight(Style::Selection));
            push_bytes(out, &visible[sel.start..sel.end]);
            out.push(DrawOp::EndHighlight);
            push_bytes(out, &visible[sel.end..]);
        }
        None => push_bytes(out, visible),
    }

    if current {
        push_str(out, &" ".repeat(width.saturating_sub(visible.len())));
        out.push(DrawOp::EndHighlight);
    }
}

/// Intersect a document-column selection with the visible slice
/// `[col_off, col_off + len)`. Returns slice-relative bounds.
fn clip(range: &RangeInclusive<usize>, col_off: usize, len: usize) -> Option<Range<usize>> {
    let lo = (*range.start()).max(col_off);
    let hi = (*range.end() + 1).min(col_off + len);
    (lo < hi).then(|| lo - col_off..hi - col_off)
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// What the status bar reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo<'a> {
    pub mode: Mode,
    pub file_name: Option<&'a str>,
    pub modified: bool,
    pub line: usize,
    pub col: usize,
}

/// The status bar text, exactly `width` characters wide.
///
/// The right-hand position block wins when space runs out; the left part is
/// cut first.
#[must_use]
pub fn status_bar(info: &StatusInfo<'_>, width: usize) -> String {
    let name = info.file_name.unwrap_or("[No Name]");
    let dirty = if info.modified { " [+]" } else { "" };
    let left = format!(" | {} |    {name}{dirty}", info.mode);
    let right = format!("| Ln {}, Col {} ", info.line + 1, info.col + 1);

    let right_len = right.chars().count();
    if right_len >= width {
        return truncate(&right, width);
    }
    let left = truncate(&left, width - right_len);
    let gap = width - right_len - left.chars().count();
    format!("{left}{}{right}", " ".repeat(gap))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn push_str(out: &mut Vec<DrawOp>, s: &str) {
    if !s.is_empty() {
        out.push(DrawOp::text(s));
    }
}

/// Line bytes as printable text. Tabs draw as one blank cell; other control
/// bytes would move the terminal cursor, so they draw as `?`.
fn push_bytes(out: &mut Vec<DrawOp>, bytes: &[u8]) {
    if bytes.is_empty() {
        return;
    }
    let text: String = String::from_utf8_lossy(bytes)
        .chars()
        .map(|c| match c {
            '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();
    out.push(DrawOp::Text(text));
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

fn cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
