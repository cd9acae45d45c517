//! Import-cycle detection.
//!
//! Cycles are legal in the input; ranking tolerates them without breaking
//! them. This module only reports them so users can see why some edges in
//! the layout point backwards.

#![allow(clippy::module_name_repetitions)]

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

/// Find all cycles currently present in `graph`.
///
/// Each entry is a sorted list of module ids in one strongly connected
/// component (SCC). Self-loops are reported as a one-element cycle. The
/// outer list is sorted for deterministic output.
#[must_use]
pub fn find_all_cycles(graph: &DiGraph<String, ()>) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = tarjan_scc(graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1 || component.first().is_some_and(|node| has_self_loop(graph, *node))
        })
        .map(|component| {
            let mut ids: Vec<String> = component.into_iter().map(|idx| node_id(graph, idx)).collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

/// Number of strongly connected components, counting every acyclic node as
/// its own component.
#[must_use]
pub fn scc_count(graph: &DiGraph<String, ()>) -> usize {
    tarjan_scc(graph).len()
}

#[must_use]
fn has_self_loop(graph: &DiGraph<String, ()>, node: NodeIndex) -> bool {
    graph.find_edge(node, node).is_some()
}

fn node_id(graph: &DiGraph<String, ()>, idx: NodeIndex) -> String {
    graph
        .node_weight(idx)
        .cloned()
        .unwrap_or_else(|| format!("#{}", idx.index()))
}
