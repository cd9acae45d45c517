//! `modmap export`: renderer-ready nodes, links and categories.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::context::Explorer;
use crate::explore::GraphExport;
use crate::output::{OutputMode, pretty_kv, render};

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Write the export to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Single-line JSON instead of indented.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Serialize)]
struct ExportSummary<'a> {
    path: String,
    language: Option<&'a str>,
    nodes: usize,
    links: usize,
    categories: usize,
}

/// Execute `modmap export`.
///
/// Without `--output` the export itself is the command output and is always
/// JSON. With `--output` the file gets the JSON and stdout a short summary.
pub fn run_export(args: &ExportArgs, output: OutputMode, explorer: &Explorer) -> Result<()> {
    let export = explorer.adapter.export();

    let Some(path) = &args.output else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        return write_export(export, args.compact, &mut out);
    };

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_export(export, args.compact, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), nodes = export.nodes.len(), "export written");

    let summary = ExportSummary {
        path: path.display().to_string(),
        language: explorer.language(),
        nodes: export.nodes.len(),
        links: export.links.len(),
        categories: export.categories.len(),
    };
    render(output, &summary, |s, w| {
        pretty_kv(w, "written", &s.path)?;
        pretty_kv(w, "language", s.language.unwrap_or("(ids)"))?;
        pretty_kv(w, "nodes", s.nodes.to_string())?;
        pretty_kv(w, "links", s.links.to_string())?;
        pretty_kv(w, "categories", s.categories.to_string())
    })
}

fn write_export(export: &GraphExport, compact: bool, out: &mut dyn Write) -> Result<()> {
    if compact {
        serde_json::to_writer(&mut *out, export)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, export)?;
    }
    writeln!(out)?;
    Ok(())
}
