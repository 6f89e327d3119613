// SPDX-License-Identifier: MIT
//
// Key dispatch and command execution.
//
// `Lined` wraps the core `Editor` and implements the event loop's `App`
// trait. Keys are routed by mode:
//
//   Edit    → typing, deleting, moving, selecting, undo/redo, ESC opens `:`
//   Command → line editing on the `:` prompt, ENTER runs it, ESC cancels
//
// Every command reports its outcome as a status message. Nothing here
// fails: file and pattern errors become message text and the buffer is
// left as it was.

use std::path::Path;
use std::time::Instant;

use lined_core::command::Command;
use lined_core::editor::Editor;
use lined_core::mode::Mode;
use lined_term::event_loop::{Action, App};
use lined_term::input::{KeyCode, KeyEvent};
use lined_term::{DrawOp, Size};

const UNSAVED: &str = "No write since last change (add ! to override)";

/// Text rows for a terminal of `size`: everything except the status bar
/// and the message row.
#[must_use]
pub fn text_rows(size: Size) -> usize {
    usize::from(size.rows).saturating_sub(2)
}

pub struct Lined {
    editor: Editor,
    /// Whether the last painted frame showed a status message.
    message_shown: bool,
}

impl Lined {
    #[must_use]
    pub const fn new(editor: Editor) -> Self {
        Self {
            editor,
            message_shown: false,
        }
    }

    #[must_use]
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    fn message(&mut self, text: impl Into<String>) {
        self.editor.set_message(text, Instant::now());
    }

    // ─── Edit Mode ──────────────────────────────────────────────────────────

    fn handle_edit(&mut self, key: &KeyEvent) -> Action {
        let ed = &mut self.editor;
        let shift = key.is_shift();

        if key.is_ctrl() {
            match key.code {
                KeyCode::Char('a') => ed.move_begin(false),
                KeyCode::Char('e') => ed.move_end(false),
                KeyCode::Char('u') => ed.delete_line_before_cursor(),
                KeyCode::Char('z') => {
                    if !ed.undo() {
                        self.message("Already at oldest change");
                    }
                }
                KeyCode::Char('y') => {
                    if !ed.redo() {
                        self.message("Already at newest change");
                    }
                }
                KeyCode::Char('q') => return self.quit(false),
                KeyCode::Left => ed.move_word_left(shift),
                KeyCode::Right => ed.move_word_right(shift),
                KeyCode::Up => ed.move_up(shift),
                KeyCode::Down => ed.move_down(shift),
                _ => {}
            }
            return Action::Continue;
        }

        match key.code {
            KeyCode::Char(ch) => ed.insert_char(ch),
            KeyCode::Tab => ed.insert_char('\t'),
            KeyCode::Enter => ed.insert_newline(),
            KeyCode::Backspace => ed.delete_char(),
            KeyCode::Delete => ed.delete_forward(),
            KeyCode::Home => ed.move_begin(shift),
            KeyCode::End => ed.move_end(shift),
            KeyCode::PageUp => ed.move_visible_top(shift),
            KeyCode::PageDown => ed.move_visible_bottom(shift),
            KeyCode::Left => ed.move_left(shift),
            KeyCode::Right => ed.move_right(shift),
            KeyCode::Up => ed.move_up(shift),
            KeyCode::Down => ed.move_down(shift),
            KeyCode::Escape => ed.enter_command_mode(),
        }
        Action::Continue
    }

    // ─── Command Mode ───────────────────────────────────────────────────────

    fn handle_command(&mut self, key: &KeyEvent) -> Action {
        let line = self.editor.command_line_mut();
        match key.code {
            KeyCode::Escape => self.editor.leave_command_mode(),
            KeyCode::Enter => {
                let command = self.editor.take_command();
                return self.execute(command);
            }
            KeyCode::Backspace => {
                if line.is_empty() {
                    self.editor.leave_command_mode();
                } else {
                    line.backspace();
                }
            }
            KeyCode::Delete => {
                line.delete();
            }
            KeyCode::Left => line.move_left(),
            KeyCode::Right => line.move_right(),
            KeyCode::Home => line.move_home(),
            KeyCode::End => line.move_end(),
            KeyCode::Char(ch) if !key.is_ctrl() => line.insert_char(ch),
            _ => {}
        }
        Action::Continue
    }

    // ─── Commands ───────────────────────────────────────────────────────────

    fn execute(&mut self, command: Command) -> Action {
        tracing::debug!(?command, "execute");
        match command {
            Command::Write { path, overwrite } => {
                self.write(path.as_deref(), overwrite);
                Action::Continue
            }
            Command::Quit { force } => self.quit(force),
            Command::WriteQuit { path, force } => {
                if self.write(path.as_deref(), force) {
                    Action::Quit
                } else {
                    Action::Continue
                }
            }
            Command::Search(pattern) => {
                self.search(&pattern);
                Action::Continue
            }
            Command::Invalid(input) => {
                tracing::debug!(input, "unknown command");
                self.message("Unknown command");
                Action::Continue
            }
        }
    }

    /// Save and report. True on success.
    fn write(&mut self, path: Option<&Path>, overwrite: bool) -> bool {
        match self.editor.save(path, overwrite) {
            Ok(saved) => {
                let text = format!("Wrote {} bytes to {}", saved.bytes, saved.path.display());
                self.message(text);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.message(e.to_string());
                false
            }
        }
    }

    /// Quit unless there are unsaved changes and `force` is off.
    fn quit(&mut self, force: bool) -> Action {
        if self.editor.is_modified() && !force {
            self.message(UNSAVED);
            return Action::Continue;
        }
        Action::Quit
    }

    fn search(&mut self, pattern: &str) {
        match self.editor.search(pattern) {
            Ok(true) => {}
            Ok(false) => self.message(format!("Pattern not found: {pattern}")),
            Err(e) => {
                // Syntax errors span several lines; the last one names the
                // problem.
                let text = e.to_string();
                let reason = text.lines().last().unwrap_or_default();
                let reason = reason.trim_start_matches("error: ");
                self.message(format!("Invalid pattern: {reason}"));
            }
        }
    }
}

// ─── App implementation ─────────────────────────────────────────────────────

impl App for Lined {
    fn on_key(&mut self, key: &KeyEvent) -> Action {
        match self.editor.mode() {
            Mode::Edit => self.handle_edit(key),
            Mode::Command => self.handle_command(key),
        }
    }

    fn on_resize(&mut self, size: Size) {
        self.editor.resize(text_rows(size), usize::from(size.cols));
    }

    fn on_tick(&mut self) -> bool {
        self.editor.message(Instant::now()).is_some() != self.message_shown
    }

    fn paint(&mut self) -> Vec<DrawOp> {
        let now = Instant::now();
        self.message_shown = self.editor.message(now).is_some();
        self.editor.render(now)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
