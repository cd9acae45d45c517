//! `modmap show`: the info panel for one module.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use modmap_core::ModmapError;

use crate::context::Explorer;
use crate::explore::NodeInfo;
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Full module id, e.g. `Algebra.Group.Basic`.
    pub id: String,
}

/// Execute `modmap show`.
///
/// # Errors
///
/// [`ModmapError::ModuleNotFound`] when the id is not in the graph.
pub fn run_show(args: &ShowArgs, output: OutputMode, explorer: &Explorer) -> Result<()> {
    let info = explorer
        .adapter
        .node_info(&args.id)
        .ok_or_else(|| ModmapError::ModuleNotFound(args.id.clone()))?;

    render(output, &info, |info, w| match output {
        OutputMode::Pretty => write_panel_pretty(info, w),
        _ => write_panel_text(info, w),
    })
}

pub fn write_panel_pretty(info: &NodeInfo, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &info.label)?;
    pretty_kv(w, "id", &info.id)?;
    pretty_kv(w, "category", &info.category)?;
    pretty_kv(w, "imports", info.in_degree.to_string())?;
    pretty_kv(w, "imported by", info.out_degree.to_string())?;
    pretty_kv(w, "rank", format!("{:.4}", info.rank))?;
    write_id_list(w, "Imports", &info.dependencies)?;
    write_id_list(w, "Imported by", &info.dependents)
}

pub fn write_panel_text(info: &NodeInfo, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "panel {} label={} category={} in={} out={} rank={:.4}",
        info.id, info.label, info.category, info.in_degree, info.out_degree, info.rank
    )?;
    if !info.dependencies.is_empty() {
        writeln!(w, "  imports: {}", info.dependencies.join(" "))?;
    }
    if !info.dependents.is_empty() {
        writeln!(w, "  imported-by: {}", info.dependents.join(" "))?;
    }
    Ok(())
}

fn write_id_list(w: &mut dyn Write, heading: &str, ids: &[String]) -> io::Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(w, "{heading} ({}):", ids.len())?;
    for id in ids {
        writeln!(w, "  {id}")?;
    }
    Ok(())
}
