//! `modmap order`: the left-to-right layout order.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use modmap_graph::rank::backward_edges;
use serde::Serialize;
use tracing::warn;

use crate::context::Explorer;
use crate::output::{OutputMode, TableRow, print_rows};

#[derive(Args, Debug, Default)]
pub struct OrderArgs {
    /// Only print the first N modules.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct OrderRow {
    pub position: usize,
    pub rank: f64,
    pub id: String,
    pub label: String,
    pub size: usize,
}

impl TableRow for OrderRow {
    const COLUMNS: &'static [&'static str] = &["POS", "RANK", "SIZE", "ID", "LABEL"];

    fn write_pretty(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{:>6}  {:.4}  {}", self.position, self.rank, self.label)
    }

    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {:.4}  {}  {}  {}",
            self.position, self.rank, self.size, self.id, self.label
        )
    }
}

/// Execute `modmap order`.
pub fn run_order(args: &OrderArgs, output: OutputMode, explorer: &Explorer) -> Result<()> {
    let adapter = &explorer.adapter;
    let ranks = adapter.ranks();

    let backward = backward_edges(adapter.graph(), ranks);
    if !backward.is_empty() {
        warn!(
            edges = backward.len(),
            "import cycles present; some dependencies are placed after their dependents"
        );
    }

    let rows: Vec<OrderRow> = ranks
        .order()
        .iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(position, id)| OrderRow {
            position,
            rank: ranks.rank(id).unwrap_or(0.0),
            id: id.clone(),
            label: adapter.node(id).map_or_else(|| id.clone(), |n| n.name.clone()),
            size: adapter.graph().degrees().size_metric(id),
        })
        .collect();

    print_rows(&rows, output)
}
