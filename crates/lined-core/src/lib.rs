//! # lined-core: editor core for lined
//!
//! The line-oriented text model and everything that turns it into a screen:
//!
//! - **[`position`]** - `Position` (line, col) and `Range`, 0-indexed
//! - **[`buffer`]** - `Document` lines and the journaled `TextBuffer`
//! - **[`history`]** - undo/redo records with cursor snapshots
//! - **[`cursor`]** - movement, sticky column, selection anchor/offset
//! - **[`word`]** - word scans within a line
//! - **[`viewport`]** - gutter width and scroll offsets
//! - **[`render`]** - draw-instruction stream for a whole frame
//! - **[`editor`]** - the owned context that ties them together
//!
//! Around the core sit the command line ([`command`]), regex [`search`],
//! file [`file`] I/O, the timed [`status`] message, [`mode`] and the
//! configuration [`options`].

pub mod buffer;
pub mod command;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod file;
pub mod history;
pub mod mode;
pub mod options;
pub mod position;
pub mod render;
pub mod search;
pub mod status;
pub mod viewport;
pub mod word;

#[cfg(test)]
mod testing;
