//! How commands print: one [`OutputMode`] per invocation, chosen once.
//!
//! # Choosing the mode
//!
//! First match wins: `--format`, the hidden `--json`, `FORMAT` in the
//! environment, `output` in the user config. With none of those, a terminal
//! gets [`OutputMode::Pretty`] and a pipe gets [`OutputMode::Text`].
//!
//! Single payloads go through [`render`] with a closure for the human form;
//! lists implement [`TableRow`] and go through [`print_rows`]. Errors always
//! go to stderr via [`render_error`] so stdout stays parseable.

use clap::ValueEnum;
use modmap_core::ModmapError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

const RULE_WIDTH: usize = 60;
const KEY_WIDTH: usize = 14;

/// Heading underlined to [`RULE_WIDTH`].
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}\n{}", "-".repeat(RULE_WIDTH))
}

/// `key:` padded to a fixed column, then the value.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    let key = format!("{key}:");
    writeln!(w, "{key:<KEY_WIDTH$} {}", value.as_ref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Sections and aligned fields for a terminal.
    Pretty,
    /// One record per line for pipes and grep.
    Text,
    /// Stable JSON.
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Pure precedence walk; unknown strings fall through to the next source.
fn pick_mode(
    flag: Option<OutputMode>,
    json: bool,
    env: Option<&str>,
    user: Option<&str>,
    terminal: bool,
) -> OutputMode {
    flag.or_else(|| json.then_some(OutputMode::Json))
        .or_else(|| env.and_then(OutputMode::parse))
        .or_else(|| user.and_then(OutputMode::parse))
        .unwrap_or(if terminal {
            OutputMode::Pretty
        } else {
            OutputMode::Text
        })
}

/// Resolve the mode for this run. `user_default` is the user config's
/// `output` value, when it has been loaded.
pub fn resolve_output_mode(
    flag: Option<OutputMode>,
    json: bool,
    user_default: Option<&str>,
) -> OutputMode {
    let env = std::env::var("FORMAT").ok();
    pick_mode(flag, json, env.as_deref(), user_default, io::stdout().is_terminal())
}

/// A list row printable in every [`OutputMode`].
///
/// JSON mode serializes the whole slice as one array, so rows only describe
/// their two human layouts.
pub trait TableRow: Serialize {
    /// Column names printed once above text rows.
    const COLUMNS: &'static [&'static str];

    /// Aligned line for a terminal.
    fn write_pretty(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Two-space separated fields, in [`TableRow::COLUMNS`] order.
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()>;
}

/// Print `rows` to stdout.
pub fn print_rows<R: TableRow>(rows: &[R], mode: OutputMode) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_rows(rows, mode, &mut out)
}

fn write_rows<R: TableRow>(rows: &[R], mode: OutputMode, out: &mut dyn Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputMode::Text => {
            if !rows.is_empty() {
                writeln!(out, "{}", R::COLUMNS.join("  "))?;
            }
            for row in rows {
                row.write_text(out)?;
            }
        }
        OutputMode::Pretty => {
            for row in rows {
                row.write_pretty(out)?;
            }
        }
    }
    Ok(())
}

/// Print one value to stdout: pretty JSON in JSON mode, `human` otherwise.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
    } else {
        human(value, &mut out)?;
    }
    Ok(())
}

/// What the user sees when a command fails.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable `E####` code from [`modmap_core::ErrorCode`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Build from any error, keeping code and suggestion when the chain
    /// carries a [`ModmapError`].
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        err.chain()
            .find_map(|cause| cause.downcast_ref::<ModmapError>())
            .map_or_else(|| Self::new(format!("{err:#}")), Self::from)
    }
}

impl From<&ModmapError> for CliError {
    fn from(err: &ModmapError) -> Self {
        Self {
            message: err.to_string(),
            suggestion: Some(err.suggestion()),
            error_code: Some(err.error_code().to_string()),
        }
    }
}

/// Print `error` on stderr: a `{"error": ...}` object in JSON mode, else
/// `error:` and `suggestion:` lines.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    write_error(mode, error, &mut out)
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> anyhow::Result<()> {
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "error": error }))?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "error: {}", error.message)?;
    if let Some(suggestion) = &error.suggestion {
        writeln!(out, "  suggestion: {suggestion}")?;
    }
    Ok(())
}
