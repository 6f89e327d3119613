//! Shared fixtures for the golden rendering tests.

use lined_term::DrawOp;
use lined_term::draw::to_notation;

/// Repository names, one per line, followed by a trailing newline so the
/// document ends with an empty 38th line.
pub const REPOS: &str = "amateuros
bash
bolt
ccan
CINEWORLD-NextJS
clib
coreutils
coroutine
dagger
dcron
endlessh
entr
Fiwix
grub2
knex
k-os
libuv
linux
minix
Mirai-Source-Code
neovim
nodemon
node-v0.x-archive
putlockertv.one
redis
SQLite-2.5.0-for-code-reading
traxxx
v8
vim
vite
vitest
vixiecron
vscode-textbuffer
xi-editor
xstate
xv6-annotated
xv6-public
";

/// Draw ops split into screen rows in compact notation. Anything after the
/// last row end (status bar, message row) lands in the final element.
pub fn rows(ops: &[DrawOp]) -> Vec<String> {
    let text = to_notation(ops);
    let mut rows: Vec<String> = text.split("<eol>").map(str::to_owned).collect();
    if rows.last().is_some_and(String::is_empty) {
        rows.pop();
    }
    rows
}

/// A plain, non-current row.
pub fn plain(number: usize, text: &str) -> String {
    format!("{number:>3} {text}<clr>")
}

/// The cursor's row: highlighted number, text band padded to `width`.
pub fn current(number: usize, text: &str, width: usize) -> String {
    let pad = " ".repeat(width - visible_len(text));
    format!("<num>{number:>3} </><cur>{text}{pad}</><clr>")
}

/// Length of `text` with highlight markers stripped.
fn visible_len(text: &str) -> usize {
    text.replace("<sel>", "").replace("</>", "").len()
}
