// SPDX-License-Identifier: MIT
//
// Keypress decoder.
//
// Turns raw stdin bytes into one logical key at a time. Recognized input:
//
// - ASCII printable characters and UTF-8 multi-byte characters
// - Control bytes (Enter, Tab, Backspace, Ctrl+letter)
// - CSI cursor keys `ESC [ A..D / H / F`, with an optional `1 ; mod` prefix
// - CSI editing keys `ESC [ n ~` (Home, End, Delete, PageUp, PageDown)
// - SS3 Home/End `ESC O H / F` and SS3 arrows
//
// # Design
//
// [`decode`] is pure: it looks at the front of a byte slice and reports a
// key plus how many bytes it used, or that more bytes are needed. The
// terminal runs with a read timeout (see `terminal.rs`), so [`KeyReader`]
// can tell "more bytes are coming" from "the user pressed a lone ESC": when
// a read times out with an incomplete sequence pending, the pending bytes
// collapse into a single Escape key.
//
// Unrecognized but complete sequences also become Escape. The editor only
// needs a fixed set of keys and an Escape is harmless in every mode.
use std::io::{self, Read};

use bitflags::bitflags;

// ─── Key Types ──────────────────────────────────────────────────────────────

/// Identity of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A character. Control combinations arrive as the letter plus
    /// [`Modifiers::CTRL`].
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Bit layout matches the xterm CSI modifier encoding, where the
    /// transmitted parameter is `1 + bitmask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
    }
}

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Ctrl + `c`.
    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    #[must_use]
    #[inline]
    pub const fn is_shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    #[must_use]
    #[inline]
    pub const fn is_ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }
}

// ─── Decoding ───────────────────────────────────────────────────────────────

/// Outcome of looking at the front of an input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A key, and how many bytes it consumed.
    Key(KeyEvent, usize),
    /// The bytes so far are a valid prefix of a longer sequence.
    Incomplete,
    /// Bytes that decode to nothing (stray UTF-8 continuation bytes).
    Skip(usize),
}

/// Decode one key from the front of `buf`.
#[must_use]
pub fn decode(buf: &[u8]) -> Decoded {
    let Some(&first) = buf.first() else {
        return Decoded::Incomplete;
    };
    match first {
        0x1B => decode_escape(buf),
        0x0A | 0x0D => key(KeyCode::Enter, 1),
        0x08 | 0x7F => key(KeyCode::Backspace, 1),
        0x09 => key(KeyCode::Tab, 1),
        0x00 => Decoded::Key(KeyEvent::ctrl('@'), 1),
        b @ 0x01..=0x1A => Decoded::Key(KeyEvent::ctrl(char::from(b + b'a' - 1)), 1),
        b @ 0x1C..=0x1F => Decoded::Key(KeyEvent::ctrl(char::from(b + 0x40)), 1),
        b @ 0x20..=0x7E => key(KeyCode::Char(char::from(b)), 1),
        0xC0..=0xFF => decode_utf8(buf),
        _ => Decoded::Skip(1),
    }
}

#[inline]
const fn key(code: KeyCode, consumed: usize) -> Decoded {
    Decoded::Key(KeyEvent::plain(code), consumed)
}

const fn escape(consumed: usize) -> Decoded {
    key(KeyCode::Escape, consumed)
}

fn decode_escape(buf: &[u8]) -> Decoded {
    match buf.get(1) {
        None => Decoded::Incomplete,
        Some(b'[') => decode_csi(buf),
        Some(b'O') => decode_ss3(buf),
        // ESC followed by anything else: the ESC stands alone.
        Some(_) => escape(1),
    }
}

// ── CSI ─────────────────────────────────────────────────────────────────────

/// `ESC [ [digit] [; modifier] final`
fn decode_csi(buf: &[u8]) -> Decoded {
    // Parameter bytes run until the first byte in 0x40..=0x7E.
    let mut end = 2;
    loop {
        let Some(&b) = buf.get(end) else {
            return Decoded::Incomplete;
        };
        if (0x40..=0x7E).contains(&b) {
            break;
        }
        if !(0x30..=0x3F).contains(&b) {
            return escape(end);
        }
        end += 1;
    }

    let consumed = end + 1;
    let params: Vec<u16> = buf[2..end]
        .split(|&b| b == b';')
        .map(parse_u16)
        .collect();
    let first = params.first().copied().unwrap_or(0);
    let modifiers = params
        .get(1)
        .map_or(Modifiers::empty(), |&p| decode_modifiers(p));

    let code = match buf[end] {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        b'~' => match first {
            1 | 7 => KeyCode::Home,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            _ => return escape(consumed),
        },
        _ => return escape(consumed),
    };
    Decoded::Key(KeyEvent::new(code, modifiers), consumed)
}

/// Decode an xterm modifier parameter (`1 + bitmask`).
fn decode_modifiers(param: u16) -> Modifiers {
    let mask = param.saturating_sub(1);
    Modifiers::from_bits_truncate(u8::try_from(mask).unwrap_or(0))
}

fn parse_u16(digits: &[u8]) -> u16 {
    digits.iter().fold(0u16, |acc, &b| {
        if b.is_ascii_digit() {
            acc.saturating_mul(10).saturating_add(u16::from(b - b'0'))
        } else {
            acc
        }
    })
}

// ── SS3 ─────────────────────────────────────────────────────────────────────

fn decode_ss3(buf: &[u8]) -> Decoded {
    let Some(&b) = buf.get(2) else {
        return Decoded::Incomplete;
    };
    let code = match b {
        b'A' => KeyCode::Up,
        b'B' => KeyCode::Down,
        b'C' => KeyCode::Right,
        b'D' => KeyCode::Left,
        b'H' => KeyCode::Home,
        b'F' => KeyCode::End,
        _ => return escape(3),
    };
    key(code, 3)
}

// ── UTF-8 ───────────────────────────────────────────────────────────────────

fn decode_utf8(buf: &[u8]) -> Decoded {
    let len = match buf[0] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Decoded::Skip(1),
    };
    if buf.len() < len {
        return Decoded::Incomplete;
    }
    match std::str::from_utf8(&buf[..len]) {
        Ok(s) => s
            .chars()
            .next()
            .map_or(Decoded::Skip(len), |c| key(KeyCode::Char(c), len)),
        Err(_) => Decoded::Skip(1),
    }
}

// ─── KeyReader ──────────────────────────────────────────────────────────────

/// Reads keys from a byte source that returns `Ok(0)` on a read timeout.
pub struct KeyReader<R> {
    source: R,
    pending: Vec<u8>,
}

impl<R: Read> KeyReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            pending: Vec::with_capacity(16),
        }
    }

    /// Read the next key.
    ///
    /// Returns `Ok(None)` when the source timed out with nothing pending.
    /// An incomplete sequence that times out is reported as Escape.
    ///
    /// # Errors
    /// Propagates read failures other than `Interrupted`.
    pub fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        loop {
            if !self.pending.is_empty() {
                match decode(&self.pending) {
                    Decoded::Key(event, consumed) => {
                        self.pending.drain(..consumed);
                        return Ok(Some(event));
                    }
                    Decoded::Skip(n) => {
                        self.pending.drain(..n);
                        continue;
                    }
                    Decoded::Incomplete => {}
                }
            }

            let mut chunk = [0u8; 32];
            let n = match self.source.read(&mut chunk) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(None),
                Err(e) => return Err(e),
            };
            if n == 0 {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                tracing::trace!(bytes = ?self.pending, "incomplete sequence timed out");
                self.pending.clear();
                return Ok(Some(KeyEvent::plain(KeyCode::Escape)));
            }
            self.pending.extend_from_slice(&chunk[..n]);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
