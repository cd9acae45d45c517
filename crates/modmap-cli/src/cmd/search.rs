//! `modmap search`: ranked fuzzy lookup over ids and labels.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use modmap_search::{MatchField, SearchHit};
use serde::Serialize;

use crate::context::Explorer;
use crate::output::{OutputMode, TableRow, print_rows};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for; characters must appear in order.
    pub query: String,

    /// Maximum number of results (defaults to `[search].limit`).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// One search result as printed by the CLI.
#[derive(Serialize)]
#[serde(transparent)]
pub struct HitRow(pub SearchHit);

impl TableRow for HitRow {
    const COLUMNS: &'static [&'static str] = &["SCORE", "FIELD", "ID", "LABEL"];

    fn write_pretty(&self, w: &mut dyn Write) -> io::Result<()> {
        let hit = &self.0;
        if hit.label == hit.id {
            writeln!(w, "{:>8}  {}", hit.score, hit.id)
        } else {
            writeln!(w, "{:>8}  {}  ({})", hit.score, hit.id, hit.label)
        }
    }

    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        let hit = &self.0;
        let field = match hit.field {
            MatchField::Id => "id",
            MatchField::Label => "label",
        };
        writeln!(w, "{}  {}  {}  {}", hit.score, field, hit.id, hit.label)
    }
}

/// Execute `modmap search`.
pub fn run_search(args: &SearchArgs, output: OutputMode, explorer: &Explorer) -> Result<()> {
    let hits = match args.limit {
        Some(limit) => explorer.adapter.search_with_limit(&args.query, limit),
        None => explorer.adapter.search(&args.query),
    };
    if hits.is_empty() && !output.is_json() {
        eprintln!("no modules match '{}'", args.query);
        return Ok(());
    }
    let rows: Vec<HitRow> = hits.into_iter().map(HitRow).collect();
    print_rows(&rows, output)
}
