// SPDX-License-Identifier: MIT
//
// lined-term: terminal layer for the lined editor.
//
// Raw termios control, ANSI escape encoding, keypress decoding, the
// painter that turns the editor's draw-instruction stream into bytes, and
// the blocking event loop that drives them. The editor core describes
// frames as `DrawOp`s and never touches escape codes itself.

pub mod ansi;
pub mod draw;
pub mod event_loop;
pub mod input;
pub mod terminal;

pub use draw::{DrawOp, Painter, Style};
pub use event_loop::{Action, App, EventLoop};
pub use input::{KeyCode, KeyEvent, KeyReader, Modifiers};
pub use terminal::{Size, Terminal};
