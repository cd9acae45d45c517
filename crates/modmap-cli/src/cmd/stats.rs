//! `modmap stats`: graph-wide numbers and the import cycles behind any
//! backwards-pointing layout edges.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use modmap_graph::graph::find_all_cycles;
use modmap_graph::{GraphStats, ModuleGraph};
use serde::Serialize;

use crate::output::{OutputMode, pretty_kv, pretty_section, render};

#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// Print at most this many cycles.
    #[arg(long, default_value_t = 20)]
    pub max_cycles: usize,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub content_hash: String,
    #[serde(flatten)]
    pub stats: GraphStats,
    pub cycles: Vec<Vec<String>>,
}

impl StatsReport {
    pub fn from_graph(graph: &ModuleGraph) -> Self {
        Self {
            content_hash: graph.content_hash.clone(),
            stats: GraphStats::from_graph(graph),
            cycles: find_all_cycles(&graph.graph),
        }
    }
}

/// Execute `modmap stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode, graph: &ModuleGraph) -> Result<()> {
    let report = StatsReport::from_graph(graph);
    render(output, &report, |report, w| match output {
        OutputMode::Pretty => write_stats_pretty(report, args.max_cycles, w),
        _ => write_stats_text(report, args.max_cycles, w),
    })
}

fn write_stats_pretty(report: &StatsReport, max_cycles: usize, w: &mut dyn Write) -> io::Result<()> {
    let s = &report.stats;
    pretty_section(w, "Graph")?;
    pretty_kv(w, "modules", s.node_count.to_string())?;
    pretty_kv(w, "imports", s.edge_count.to_string())?;
    pretty_kv(w, "categories", s.category_count.to_string())?;
    pretty_kv(w, "density", format!("{:.6}", s.density))?;
    pretty_kv(w, "components", s.weakly_connected_component_count.to_string())?;
    pretty_kv(w, "roots", s.root_count.to_string())?;
    pretty_kv(w, "leaves", s.leaf_count.to_string())?;
    pretty_kv(w, "isolated", s.isolated_node_count.to_string())?;
    pretty_kv(w, "max imports", s.max_in_degree.to_string())?;
    pretty_kv(w, "max fan-out", s.max_out_degree.to_string())?;
    pretty_kv(w, "hash", &report.content_hash)?;

    writeln!(w)?;
    pretty_section(w, "Cycles")?;
    if report.cycles.is_empty() {
        writeln!(w, "none; the layout order is a true topological order")?;
        return Ok(());
    }
    for cycle in report.cycles.iter().take(max_cycles) {
        writeln!(w, "  {} modules: {}", cycle.len(), cycle.join(", "))?;
    }
    write_truncation(report, max_cycles, w)
}

fn write_stats_text(report: &StatsReport, max_cycles: usize, w: &mut dyn Write) -> io::Result<()> {
    let s = &report.stats;
    writeln!(
        w,
        "nodes={} edges={} categories={} density={:.6} components={} sccs={} cycles={}",
        s.node_count,
        s.edge_count,
        s.category_count,
        s.density,
        s.weakly_connected_component_count,
        s.scc_count,
        s.cycle_count
    )?;
    writeln!(
        w,
        "roots={} leaves={} isolated={} max_in={} max_out={}",
        s.root_count, s.leaf_count, s.isolated_node_count, s.max_in_degree, s.max_out_degree
    )?;
    for cycle in report.cycles.iter().take(max_cycles) {
        writeln!(w, "cycle {}", cycle.join(" "))?;
    }
    write_truncation(report, max_cycles, w)
}

fn write_truncation(report: &StatsReport, max_cycles: usize, w: &mut dyn Write) -> io::Result<()> {
    let hidden = report.cycles.len().saturating_sub(max_cycles);
    if hidden > 0 {
        writeln!(w, "... {hidden} more (use --max-cycles)")?;
    }
    Ok(())
}
