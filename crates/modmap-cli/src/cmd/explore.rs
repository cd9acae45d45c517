//! `modmap explore`: a scriptable, line-oriented stand-in for the view.
//!
//! Each input line is one interaction; every command the adapter emits is
//! printed as it happens (one JSON object per line in JSON mode).
//!
//! ```text
//! click <id>       select a module
//! canvas           click on empty space
//! search <text>    run a search
//! back | forward   walk the navigation history
//! lang <code>      switch label language
//! quit             end the session (EOF works too)
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tracing::{debug, info};

use crate::cmd::show::{write_panel_pretty, write_panel_text};
use crate::context::{Explorer, LanguageOutcome};
use crate::explore::{ViewCommand, ViewEvent};
use crate::output::{CliError, OutputMode, render_error};

#[derive(Args, Debug, Default)]
pub struct ExploreArgs {
    /// Stop at the first unrecognized line instead of skipping it.
    #[arg(long)]
    pub strict: bool,
}

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    Event(ViewEvent),
    Language(String),
    Quit,
}

/// Parse one input line. `Ok(None)` for blank lines and comments.
///
/// # Errors
///
/// Returns a description of the problem for unknown verbs or missing
/// arguments.
pub fn parse_line(line: &str) -> Result<Option<SessionInput>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let input = match (verb, rest) {
        ("click", "") => return Err("click needs a module id".into()),
        ("click", id) => SessionInput::Event(ViewEvent::NodeClicked(id.to_string())),
        ("canvas", _) => SessionInput::Event(ViewEvent::CanvasClicked),
        ("search", text) => SessionInput::Event(ViewEvent::SearchInput(text.to_string())),
        ("back", _) => SessionInput::Event(ViewEvent::HistoryBack),
        ("forward", _) => SessionInput::Event(ViewEvent::HistoryForward),
        ("lang", "") => return Err("lang needs a language code".into()),
        ("lang", code) => SessionInput::Language(code.to_string()),
        ("quit" | "exit", _) => SessionInput::Quit,
        (other, _) => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(input))
}

/// Execute `modmap explore`, reading interactions from stdin.
pub fn run_explore(args: &ExploreArgs, output: OutputMode, explorer: &mut Explorer) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(args, output, explorer, stdin.lock(), &mut stdout.lock())
}

fn run_session(
    args: &ExploreArgs,
    output: OutputMode,
    explorer: &mut Explorer,
    input: impl BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    let outbox: Rc<RefCell<Vec<ViewCommand>>> = Rc::default();
    let sink = Rc::clone(&outbox);
    explorer.adapter.subscribe(Box::new(move |command: &ViewCommand| {
        sink.borrow_mut().push(command.clone());
    }));

    info!(language = explorer.language(), "explore session started");
    let mut handled = 0usize;

    for line in input.lines() {
        let line = line?;

        if let Some(outcome) = explorer.poll_translation() {
            write_language(output, &outcome, out)?;
        }

        let parsed = match parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(problem) => {
                render_error(output, &CliError::new(problem.clone()))?;
                if args.strict {
                    anyhow::bail!(problem);
                }
                continue;
            }
        };

        match parsed {
            SessionInput::Event(event) => explorer.adapter.handle(event),
            SessionInput::Language(code) => {
                let outcome = explorer.switch_language(&code);
                write_language(output, &outcome, out)?;
            }
            SessionInput::Quit => break,
        }
        handled += 1;

        for command in outbox.borrow_mut().drain(..) {
            write_command(output, &command, out)?;
        }
        out.flush()?;
    }

    debug!(
        handled,
        history = ?explorer.adapter.history().path(),
        "explore session finished"
    );
    Ok(())
}

fn write_command(output: OutputMode, command: &ViewCommand, out: &mut dyn Write) -> io::Result<()> {
    if output.is_json() {
        serde_json::to_writer(&mut *out, command)?;
        return writeln!(out);
    }
    match command {
        ViewCommand::FocusNode { id, x, y } => writeln!(out, "focus {id} x={x:.1} y={y:.1}"),
        ViewCommand::RenderPanel(info) if output == OutputMode::Pretty => {
            write_panel_pretty(info, out)?;
            writeln!(out)
        }
        ViewCommand::RenderPanel(info) => write_panel_text(info, out),
        ViewCommand::ClearPanel => writeln!(out, "clear"),
        ViewCommand::SearchResults { query, hits } => {
            writeln!(out, "results {} for '{query}'", hits.len())?;
            for hit in hits {
                writeln!(out, "  {:>8}  {}  {}", hit.score, hit.id, hit.label)?;
            }
            Ok(())
        }
    }
}

fn write_language(output: OutputMode, outcome: &LanguageOutcome, out: &mut dyn Write) -> io::Result<()> {
    let (language, status, detail) = match outcome {
        LanguageOutcome::Loaded { language, entries } => {
            (language, "loaded", format!("{entries} entries"))
        }
        LanguageOutcome::Failed { language, error } => (language, "failed", error.to_string()),
        LanguageOutcome::Pending { language } => (language, "pending", "still loading".to_string()),
    };
    if output.is_json() {
        let line = json!({ "command": "language", "language": language, "status": status, "detail": detail });
        serde_json::to_writer(&mut *out, &line)?;
        return writeln!(out);
    }
    writeln!(out, "language {language} {status}: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_verb() {
        assert_eq!(
            parse_line("click Algebra.Group"),
            Ok(Some(SessionInput::Event(ViewEvent::NodeClicked("Algebra.Group".into()))))
        );
        assert_eq!(
            parse_line("canvas"),
            Ok(Some(SessionInput::Event(ViewEvent::CanvasClicked)))
        );
        assert_eq!(
            parse_line("search  group basic "),
            Ok(Some(SessionInput::Event(ViewEvent::SearchInput("group basic".into()))))
        );
        assert_eq!(parse_line("back"), Ok(Some(SessionInput::Event(ViewEvent::HistoryBack))));
        assert_eq!(
            parse_line("forward"),
            Ok(Some(SessionInput::Event(ViewEvent::HistoryForward)))
        );
        assert_eq!(parse_line("lang zh-HANS"), Ok(Some(SessionInput::Language("zh-HANS".into()))));
        assert_eq!(parse_line("quit"), Ok(Some(SessionInput::Quit)));
    }

    #[test]
    fn bare_search_is_an_empty_query() {
        assert_eq!(
            parse_line("search"),
            Ok(Some(SessionInput::Event(ViewEvent::SearchInput(String::new()))))
        );
    }

    #[test]
    fn blanks_and_comments_are_skipped() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# setup"), Ok(None));
    }

    #[test]
    fn malformed_lines_are_errors() {
        assert!(parse_line("click").is_err());
        assert!(parse_line("lang ").is_err());
        assert!(parse_line("jump A").is_err());
    }

    #[test]
    fn text_commands_are_one_line_each() {
        let mut buf = Vec::new();
        write_command(
            OutputMode::Text,
            &ViewCommand::FocusNode {
                id: "A.X".into(),
                x: 400.0,
                y: 12.345,
            },
            &mut buf,
        )
        .expect("write");
        write_command(OutputMode::Text, &ViewCommand::ClearPanel, &mut buf).expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "focus A.X x=400.0 y=12.3\nclear\n");
    }

    #[test]
    fn json_commands_are_json_lines() {
        let mut buf = Vec::new();
        write_command(OutputMode::Json, &ViewCommand::ClearPanel, &mut buf).expect("write");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "{\"command\":\"clear_panel\"}\n");
    }
}
