//! Editor configuration.
//!
//! Read from a TOML file passed on the command line. Every key is optional;
//! unknown keys are an error so a typo does not silently fall back to a
//! default.
//!
//! | Key                    | Type    | Default |
//! |------------------------|---------|---------|
//! | `empty_line_marker`    | string  | `"~"`   |
//! | `min_gutter_width`     | integer | 3       |
//! | `message_timeout_secs` | integer | 5       |

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::viewport::DEFAULT_MIN_GUTTER;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Drawn on screen rows past the end of the document.
    pub empty_line_marker: String,
    /// Narrowest line-number gutter, in columns.
    pub min_gutter_width: usize,
    /// How long a status message stays visible.
    pub message_timeout_secs: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            empty_line_marker: "~".to_owned(),
            min_gutter_width: DEFAULT_MIN_GUTTER,
            message_timeout_secs: 5,
        }
    }
}

impl Options {
    /// Parse options from TOML text.
    ///
    /// # Errors
    /// Returns the TOML error for malformed input or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse `path`.
    ///
    /// # Errors
    /// [`ConfigError::Read`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), ?options, "loaded config");
        Ok(options)
    }

    #[must_use]
    pub const fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
