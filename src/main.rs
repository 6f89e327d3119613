// SPDX-License-Identifier: MIT
//
// lined: a small line-oriented terminal text editor.
//
// This is the main binary that wires the crates together:
//
//   lined-term → raw mode, key decoding, draw-op painting, event loop
//   lined-core → text buffer, undo journal, cursor, viewport, renderer
//
// `app::Lined` implements lined-term's `App` trait around the core
// `Editor`. Each keypress flows through:
//
//   stdin → KeyReader → on_key → mode dispatch → editor operation
//   paint → scroll → render_frame → Painter → terminal
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ gutter + text                │  ← h - 2 rows
//   ├──────────────────────────────┤
//   │ status bar (INVERSE)         │  ← 1 row
//   ├──────────────────────────────┤
//   │ command / message line       │  ← 1 row
//   └──────────────────────────────┘

mod app;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use lined_core::editor::Editor;
use lined_core::options::Options;
use lined_term::event_loop::EventLoop;

use crate::app::{Lined, text_rows};

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "lined", version, about = "A small line-oriented terminal text editor")]
struct Cli {
    /// File to open. Without one the editor starts on an unnamed buffer.
    file: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here. Filtered by `LINED_LOG` (default `info`).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── Logging ────────────────────────────────────────────────────────────────

/// Install a file subscriber. The returned guard flushes on drop and must
/// live until exit.
fn init_logging(path: &Path) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("LINED_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))?;
    Ok(guard)
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<()> {
    let _log_guard = cli.log_file.as_deref().map(init_logging).transpose()?;
    tracing::info!(file = ?cli.file, config = ?cli.config, "startup");

    let options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let mut event_loop = EventLoop::new();
    let size = event_loop.size().context("cannot determine terminal size")?;
    let (rows, cols) = (text_rows(size), usize::from(size.cols));

    let editor = match &cli.file {
        Some(path) => Editor::open(path, rows, cols, options)?,
        None => Editor::new(rows, cols, options),
    };

    let mut app = Lined::new(editor);
    event_loop.run(&mut app).context("terminal failure")?;
    tracing::info!("exit");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("lined: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_parses_all_arguments() {
        let cli = Cli::parse_from([
            "lined",
            "notes.txt",
            "--config",
            "lined.toml",
            "--log-file",
            "lined.log",
        ]);
        assert_eq!(cli.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(cli.config, Some(PathBuf::from("lined.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("lined.log")));
    }

    #[test]
    fn cli_everything_optional() {
        let cli = Cli::parse_from(["lined"]);
        assert_eq!(cli.file, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["lined", "--frobnicate"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
