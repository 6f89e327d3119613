//! Error types for file and configuration I/O.
//!
//! Editing itself never fails: out-of-range positions are clamped and empty
//! history is a no-op. Only the edges that touch the filesystem return these.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Loading or saving a document failed.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Save target exists and overwrite was not requested.
    #[error("Cannot overwrite existing file {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Save without a path while the buffer has none.
    #[error("No file name")]
    NoFileName,
}

impl FileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Reading the configuration file failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
