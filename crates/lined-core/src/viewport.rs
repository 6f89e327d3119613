//! Viewport: which part of the document is on screen.
//!
//! The viewport owns the window size and the scroll offsets. It never owns
//! the document or the cursor; [`Viewport::scroll`] is recomputed from them
//! before every render.
//!
//! # Layout of a text row
//!
//! ```text
//!  26 SQLite-2.5.0-for-code-reading
//! ├──┤│├──────────────────────────────
//! gutter  text (visible_width columns)
//!     └ separator space
//! ```
//!
//! The gutter is `max(min_gutter, digits(line_count))` columns wide, right
//! aligned, followed by a single space.

/// Width of the line-number field for a document of `line_count` lines.
#[must_use]
pub fn gutter_width(line_count: usize, min_width: usize) -> usize {
    let digits = line_count.max(1).ilog10() as usize + 1;
    digits.max(min_width)
}

/// Default minimum gutter width.
pub const DEFAULT_MIN_GUTTER: usize = 3;

/// Visible window and scroll state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    rows: usize,
    cols: usize,
    row_off: usize,
    col_off: usize,
    min_gutter: usize,
}

impl Viewport {
    /// A viewport of `rows` text rows by `cols` columns, scrolled to the top.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            row_off: 0,
            col_off: 0,
            min_gutter: DEFAULT_MIN_GUTTER,
        }
    }

    #[must_use]
    pub const fn with_min_gutter(mut self, min_gutter: usize) -> Self {
        self.min_gutter = min_gutter;
        self
    }

    // -- Accessors ----------------------------------------------------------

    /// Text rows (status and message rows excluded).
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// First document line on screen.
    #[inline]
    #[must_use]
    pub const fn row_off(&self) -> usize {
        self.row_off
    }

    /// First document column on screen.
    #[inline]
    #[must_use]
    pub const fn col_off(&self) -> usize {
        self.col_off
    }

    pub const fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Gutter width for a document of `line_count` lines.
    #[must_use]
    pub fn gutter(&self, line_count: usize) -> usize {
        gutter_width(line_count, self.min_gutter)
    }

    /// Columns left for text after the gutter and its separator.
    #[must_use]
    pub fn visible_width(&self, line_count: usize) -> usize {
        self.cols.saturating_sub(self.gutter(line_count) + 1)
    }

    /// Last document line the window can show (may be past the end).
    #[must_use]
    pub const fn last_visible_line(&self) -> usize {
        (self.row_off + self.rows).saturating_sub(1)
    }

    // -- Scrolling ----------------------------------------------------------

    /// Move the offsets just enough to bring the cursor on screen.
    ///
    /// Afterwards `row_off <= y < row_off + rows` and
    /// `col_off <= x < col_off + visible_width`. A zero-sized window is
    /// treated as one cell so the bounds still hold.
    pub fn scroll(&mut self, x: usize, y: usize, line_count: usize) {
        let rows = self.rows.max(1);
        if y < self.row_off {
            self.row_off = y;
        }
        if y >= self.row_off + rows {
            self.row_off = y - rows + 1;
        }

        let width = self.visible_width(line_count).max(1);
        if x < self.col_off {
            self.col_off = x;
        }
        if x >= self.col_off + width {
            self.col_off = x - width + 1;
        }
        tracing::trace!(row_off = self.row_off, col_off = self.col_off, "scroll");
    }

    /// Screen column of document column `x`.
    #[must_use]
    pub fn screen_col(&self, x: usize, line_count: usize) -> usize {
        self.gutter(line_count) + 1 + x.saturating_sub(self.col_off)
    }

    /// Screen row of document line `y`.
    #[must_use]
    pub const fn screen_row(&self, y: usize) -> usize {
        y.saturating_sub(self.row_off)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
