//! Timed status message.
//!
//! A message is never cleared from state once set. It simply stops being
//! shown once it is older than the configured timeout, which is decided at
//! render time.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl StatusMessage {
    #[must_use]
    pub fn new(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            set_at: now,
        }
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text if the message is younger than `timeout` at `now`.
    #[must_use]
    pub fn visible_at(&self, now: Instant, timeout: Duration) -> Option<&str> {
        (now.saturating_duration_since(self.set_at) < timeout).then_some(self.text.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
