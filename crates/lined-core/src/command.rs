//! Command line: the `:` prompt on the message row.
//!
//! ESC in edit mode opens the prompt. ENTER parses the input into a
//! [`Command`]; the application executes it and reports the outcome as a
//! status message.
//!
//! # Grammar
//!
//! | Input            | Command                                   |
//! |------------------|-------------------------------------------|
//! | `w`              | Save to the buffer's own path             |
//! | `w <name>`       | Save to `<name>`, refusing to overwrite   |
//! | `w! <name>`      | Save to `<name>`, overwriting             |
//! | `q` / `q!`       | Quit / quit discarding changes            |
//! | `wq` / `wq!`     | Save then quit                            |
//! | `/<pattern>`     | Regex search from the cursor              |
//!
//! A trailing `!` on the command word is the override modifier. There is no
//! quoting or escaping: words are split on whitespace. Anything else parses
//! to [`Command::Invalid`] rather than failing.

use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Lexer
// ---------------------------------------------------------------------------

/// A lexical token of a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A maximal run of non-whitespace characters.
    Word(&'a str),
    /// One whitespace character.
    Space,
}

/// Split `line` into words and single-character spaces.
#[must_use]
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start = None;
    for (i, ch) in line.char_indices() {
        if ch.is_whitespace() {
            if let Some(start) = word_start.take() {
                tokens.push(Token::Word(&line[start..i]));
            }
            tokens.push(Token::Space);
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        tokens.push(Token::Word(&line[start..]));
    }
    tokens
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `w`, `w <name>`, `w! <name>`.
    Write {
        path: Option<PathBuf>,
        overwrite: bool,
    },
    /// `q`, `q!`.
    Quit { force: bool },
    /// `wq`, `wq!`, optionally with a name.
    WriteQuit {
        path: Option<PathBuf>,
        force: bool,
    },
    /// `/<pattern>`.
    Search(String),
    /// Anything unrecognized, kept verbatim for reporting.
    Invalid(String),
}

/// Parse a command line (without the leading `:`).
#[must_use]
pub fn parse(line: &str) -> Command {
    if let Some(pattern) = line.strip_prefix('/') {
        if pattern.is_empty() {
            return Command::Invalid(line.to_owned());
        }
        return Command::Search(pattern.to_owned());
    }

    let words: Vec<&str> = tokenize(line)
        .into_iter()
        .filter_map(|t| match t {
            Token::Word(w) => Some(w),
            Token::Space => None,
        })
        .collect();

    let invalid = || Command::Invalid(line.to_owned());
    let (name, arg) = match words.as_slice() {
        [name] => (*name, None),
        [name, arg] => (*name, Some(PathBuf::from(*arg))),
        _ => return invalid(),
    };
    let (name, bang) = name
        .strip_suffix('!')
        .map_or((name, false), |stripped| (stripped, true));

    match (name, arg) {
        ("w", path) => Command::Write {
            path,
            overwrite: bang,
        },
        ("q", None) => Command::Quit { force: bang },
        ("wq", path) => Command::WriteQuit { path, force: bang },
        _ => invalid(),
    }
}

// ---------------------------------------------------------------------------
// CommandLine
// ---------------------------------------------------------------------------

/// The prompt's input buffer. The leading `:` is drawn, not stored.
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    input: String,
    /// Char offset into `input`.
    cursor: usize,
}

impl CommandLine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the char before the cursor. False at the start of the input.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.input.remove(at);
        true
    }

    /// Delete the char under the cursor. False at the end of the input.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.input.remove(at);
        true
    }

    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    #[must_use]
    pub fn parse(&self) -> Command {
        parse(&self.input)
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(i, _)| i)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
