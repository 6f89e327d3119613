// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Event loop: read a key, let the app handle it, repaint.
//
// Single-threaded and blocking. The terminal's read timeout (see
// `terminal.rs`) wakes the loop every 100ms even when nothing is typed,
// which is when a lone ESC is resolved, a pending resize is noticed, and
// `App::on_tick` gets a chance to ask for a repaint.
//
// # Frame Model
//
// The app describes a whole frame as `DrawOp`s. The loop encodes it with
// the `Painter` into one byte buffer and writes it in a single call, so
// the terminal never shows a half-drawn frame. Frames are only produced
// when something changed.
//
// # SIGWINCH Handling
//
// A signal handler sets an `AtomicBool`; the loop checks it after every
// read and passes the new size to `App::on_resize`.

use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::draw::{DrawOp, Painter};
use crate::input::{KeyEvent, KeyReader};
use crate::terminal::{Size, Terminal, is_tty};

// ─── SIGWINCH ────────────────────────────────────────────────────────────────

static SIGWINCH_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
fn install_sigwinch_handler() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = sigwinch_handler as *const () as usize;
        // No SA_RESTART: an interrupted read returns early and the resize
        // is handled without waiting for the read timeout.
        sa.sa_flags = 0;
        libc::sigemptyset(&raw mut sa.sa_mask);
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(unix)]
extern "C" fn sigwinch_handler(_sig: libc::c_int) {
    SIGWINCH_RECEIVED.store(true, Ordering::Relaxed);
}

#[cfg(not(unix))]
const fn install_sigwinch_handler() {}

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the loop after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Application interface for the event loop.
///
/// Per iteration the loop calls, in order:
///
/// 1. [`on_key`](App::on_key) for a key, if one arrived
/// 2. [`on_resize`](App::on_resize) when the terminal size changed
/// 3. [`on_tick`](App::on_tick) every iteration
/// 4. [`paint`](App::paint) when any of the above asked for a repaint
pub trait App {
    /// Handle one key. Return [`Action::Quit`] to leave the loop.
    fn on_key(&mut self, key: &KeyEvent) -> Action;

    fn on_resize(&mut self, _size: Size) {}

    /// Time-based state. Return `true` to request a repaint.
    fn on_tick(&mut self) -> bool {
        false
    }

    /// The full frame to draw.
    fn paint(&mut self) -> Vec<DrawOp>;
}

// ─── Stepping ────────────────────────────────────────────────────────────────

/// Outcome of one read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The app asked to quit.
    Quit,
    /// A key was handled.
    Handled,
    /// The read timed out.
    Idle,
}

/// Read at most one key and hand it to `app`.
///
/// # Errors
/// Propagates read failures from `reader`.
pub fn step<R: Read>(reader: &mut KeyReader<R>, app: &mut impl App) -> io::Result<Step> {
    let Some(key) = reader.read_key()? else {
        return Ok(Step::Idle);
    };
    tracing::trace!(?key, "key");
    Ok(match app.on_key(&key) {
        Action::Quit => Step::Quit,
        Action::Continue => Step::Handled,
    })
}

/// Encode one frame from `app` into `out`, replacing its contents.
///
/// # Errors
/// Never fails when writing to memory; the `Result` comes from the
/// painter's writer interface.
pub fn encode_frame(painter: &mut Painter, app: &mut impl App, out: &mut Vec<u8>) -> io::Result<()> {
    out.clear();
    let ops = app.paint();
    painter.paint(out, &ops)?;
    painter.finish(out)
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// Owns the terminal and the key reader. [`run`](Self::run) returns when
/// the app answers [`Action::Quit`].
///
/// ```no_run
/// use lined_term::event_loop::{Action, App, EventLoop};
/// use lined_term::{DrawOp, KeyCode, KeyEvent};
///
/// struct Quitter;
///
/// impl App for Quitter {
///     fn on_key(&mut self, key: &KeyEvent) -> Action {
///         if key.code == KeyCode::Char('q') {
///             return Action::Quit;
///         }
///         Action::Continue
///     }
///
///     fn paint(&mut self) -> Vec<DrawOp> {
///         vec![DrawOp::text("press q")]
///     }
/// }
///
/// EventLoop::new().run(&mut Quitter)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct EventLoop {
    terminal: Terminal,
    reader: KeyReader<io::Stdin>,
    painter: Painter,
}

impl EventLoop {
    #[must_use]
    pub fn new() -> Self {
        Self {
            terminal: Terminal::new(),
            reader: KeyReader::new(io::stdin()),
            painter: Painter::new(),
        }
    }

    /// Current terminal size.
    ///
    /// # Errors
    /// See [`Terminal::size`].
    pub fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }

    /// Enter raw mode, run until the app quits, and restore the terminal
    /// whether or not the loop failed.
    ///
    /// # Errors
    /// Terminal setup, read, or write failures.
    pub fn run(&mut self, app: &mut impl App) -> io::Result<()> {
        if cfg!(unix) && !is_tty() {
            return Err(io::Error::other("stdin is not a terminal"));
        }
        self.terminal.enter()?;
        install_sigwinch_handler();

        let result = self.run_inner(app);
        let restored = self.terminal.leave();
        result.and(restored)
    }

    fn run_inner(&mut self, app: &mut impl App) -> io::Result<()> {
        let mut frame = Vec::with_capacity(16 * 1024);
        let mut dirty = true;

        loop {
            if dirty {
                encode_frame(&mut self.painter, app, &mut frame)?;
                self.terminal.write_frame(&frame)?;
                dirty = false;
            }

            match step(&mut self.reader, app)? {
                Step::Quit => return Ok(()),
                Step::Handled => dirty = true,
                Step::Idle => {}
            }

            if SIGWINCH_RECEIVED.swap(false, Ordering::Relaxed) {
                let size = self.terminal.size()?;
                tracing::debug!(cols = size.cols, rows = size.rows, "resize");
                app.on_resize(size);
                dirty = true;
            }

            if app.on_tick() {
                dirty = true;
            }
        }
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
