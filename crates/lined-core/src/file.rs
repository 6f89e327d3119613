//! Loading and saving documents.
//!
//! Files are read as raw bytes and split on `\n`; trailing `\r` is dropped
//! from every line. On save every line is written followed by `\n`, so a
//! file that already ended in a newline round-trips byte for byte. A
//! document holding one empty line writes an empty file, unless it was
//! loaded from a non-empty one (`"\n"`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::buffer::TextBuffer;
use crate::cursor::Cursor;
use crate::error::FileError;
use crate::position::Position;

/// Split file contents into lines without terminators.
///
/// A final newline does not start an extra empty line.
#[must_use]
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n').map(trim_cr).collect()
}

fn trim_cr(mut line: &[u8]) -> &[u8] {
    while let Some(rest) = line.strip_suffix(b"\r") {
        line = rest;
    }
    line
}

/// Read `path` into a fresh buffer.
///
/// Lines go through the buffer's normal insert path; the resulting history
/// is discarded, so the first undo after opening has nothing to revert. The
/// buffer starts unmodified with `path` as its file name.
///
/// # Errors
/// [`FileError::Io`] if the file cannot be read.
pub fn load(path: &Path) -> Result<TextBuffer, FileError> {
    let bytes = fs::read(path).map_err(|e| FileError::io(path, e))?;
    let mut buffer = TextBuffer::new();
    let origin = Cursor::new();
    let mut end = Position::ZERO;
    for (i, line) in split_lines(&bytes).into_iter().enumerate() {
        if i > 0 {
            end = buffer.insert_bytes(b"\n", end, origin);
        }
        end = buffer.insert_bytes(line, end, origin);
    }
    buffer.clear_history();
    buffer.mark_saved();
    buffer.set_keeps_blank_line(!bytes.is_empty());
    buffer.set_path(path.to_path_buf());
    tracing::info!(path = %path.display(), lines = buffer.line_count(), "loaded");
    Ok(buffer)
}

/// The bytes a buffer saves as.
#[must_use]
pub fn encode(buffer: &TextBuffer) -> Vec<u8> {
    let doc = buffer.doc();
    if doc.line_count() == 1 && doc.line_len(0) == 0 && !buffer.keeps_blank_line() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for line in doc.lines() {
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
    }
    out
}

/// A completed save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub bytes: usize,
    pub path: PathBuf,
}

/// Write `buffer` to `target`, or to its own path when `target` is `None`.
///
/// An explicit `target` that already exists is refused unless `overwrite`
/// is set; the buffer's own path is always rewritten. A buffer without a
/// path adopts `target`. The buffer is marked clean only when the write
/// went to its own file.
///
/// # Errors
/// [`FileError::NoFileName`] with no target and no path,
/// [`FileError::AlreadyExists`] for a refused overwrite,
/// [`FileError::Io`] if writing fails.
pub fn save(
    buffer: &mut TextBuffer,
    target: Option<&Path>,
    overwrite: bool,
) -> Result<Saved, FileError> {
    let path = match target {
        Some(path) => {
            if !overwrite && path.exists() {
                tracing::warn!(path = %path.display(), "refusing to overwrite");
                return Err(FileError::AlreadyExists(path.to_path_buf()));
            }
            path.to_path_buf()
        }
        None => buffer
            .path()
            .map(Path::to_path_buf)
            .ok_or(FileError::NoFileName)?,
    };

    let bytes = encode(buffer);
    fs::write(&path, &bytes).map_err(|e| FileError::io(&path, e))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "saved");

    if buffer.path().is_none_or(|own| own == path.as_path()) {
        buffer.mark_saved();
    }
    if buffer.path().is_none() {
        buffer.set_path(path.clone());
    }
    Ok(Saved {
        bytes: bytes.len(),
        path,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
