//! Editing modes.
//!
//! | Mode    | Keys go to         | Terminal cursor       |
//! |---------|--------------------|-----------------------|
//! | Edit    | the document       | at the text cursor    |
//! | Command | the command line   | on the message row    |
//!
//! Edit is modeless in the usual sense: typing inserts, arrows move, shifted
//! arrows select. ESC opens the command line; ENTER runs it and ESC or
//! BACKSPACE on empty input cancel it.

use std::fmt;

/// The current editing mode.
///
/// Pure data. Key dispatch and the transitions between modes live in the
/// application layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keys edit the document.
    #[default]
    Edit,
    /// Keys edit the `:` command line.
    Command,
}

impl Mode {
    /// Name shown in the status bar.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Edit => "EDIT",
            Self::Command => "COMMAND",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_command(self) -> bool {
        matches!(self, Self::Command)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Mode::Edit.display_name(), "EDIT");
        assert_eq!(Mode::Command.display_name(), "COMMAND");
        assert_eq!(format!("{}", Mode::Command), "COMMAND");
    }

    #[test]
    fn default_is_edit() {
        assert_eq!(Mode::default(), Mode::Edit);
        assert!(!Mode::default().is_command());
        assert!(Mode::Command.is_command());
    }
}
