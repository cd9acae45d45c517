//! Summary statistics for the module graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: modules and import edges.
//! - **density**: `edge_count / (node_count * (node_count - 1))`; zero for
//!   graphs with fewer than two modules. Parallel edges can push it above 1.0
//!   on tiny graphs.
//! - **category_count**: distinct top-level categories.
//! - **scc_count**: strongly connected components. Equals `node_count` in an
//!   acyclic graph.
//! - **cycle_count**: SCCs with more than one member, plus self-loops.
//! - **weakly_connected_component_count**: disjoint subgraphs when edge
//!   direction is ignored.
//! - **isolated_node_count**: modules with no edges at all.
//! - **root_count**: modules that import nothing but are imported.
//! - **leaf_count**: modules that import something but nobody imports.
//! - **max_in_degree** / **max_out_degree**: the largest import list and
//!   the most-imported module's fan-out.

use petgraph::algo::connected_components;
use serde::Serialize;

use modmap_core::module_id::categories_in_order;

use crate::graph::build::ModuleGraph;
use crate::graph::cycles::{find_all_cycles, scc_count};

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a module graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub category_count: usize,
    pub scc_count: usize,
    pub cycle_count: usize,
    pub weakly_connected_component_count: usize,
    pub isolated_node_count: usize,
    pub root_count: usize,
    pub leaf_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a [`ModuleGraph`].
    #[must_use]
    pub fn from_graph(graph: &ModuleGraph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let mut isolated_node_count = 0;
        let mut root_count = 0;
        let mut leaf_count = 0;
        let mut max_in_degree = 0;
        let mut max_out_degree = 0;

        for id in graph.nodes() {
            let degree = graph.degree(id);
            match (degree.in_degree, degree.out_degree) {
                (0, 0) => isolated_node_count += 1,
                (0, _) => root_count += 1,
                (_, 0) => leaf_count += 1,
                _ => {}
            }
            max_in_degree = max_in_degree.max(degree.in_degree);
            max_out_degree = max_out_degree.max(degree.out_degree);
        }

        let weakly_connected_component_count = if node_count == 0 {
            0
        } else {
            connected_components(&graph.graph)
        };

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            category_count: categories_in_order(graph.nodes()).len(),
            scc_count: scc_count(&graph.graph),
            cycle_count: find_all_cycles(&graph.graph).len(),
            weakly_connected_component_count,
            isolated_node_count,
            root_count,
            leaf_count,
            max_in_degree,
            max_out_degree,
        }
    }

    /// `true` when the graph has no cycles, i.e. ranks are a true
    /// topological order.
    #[must_use]
    pub const fn is_acyclic(&self) -> bool {
        self.cycle_count == 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use modmap_core::Adjacency;

    fn stats_of(pairs: &[(&str, &[&str])]) -> GraphStats {
        let adjacency = Adjacency::from_pairs(pairs.iter().map(|(k, v)| (*k, v.iter().copied())));
        GraphStats::from_graph(&ModuleGraph::from_adjacency(&adjacency))
    }

    #[test]
    fn empty_graph_stats() {
        let s = stats_of(&[]);
        assert_eq!(s.node_count, 0);
        assert_eq!(s.edge_count, 0);
        assert!(s.density.abs() < f64::EPSILON);
        assert_eq!(s.weakly_connected_component_count, 0);
        assert!(s.is_acyclic());
    }

    #[test]
    fn chain_stats() {
        // Order.Basic → Algebra.Group → Algebra.Ring
        let s = stats_of(&[
            ("Algebra.Ring", &["Algebra.Group"]),
            ("Algebra.Group", &["Order.Basic"]),
        ]);
        assert_eq!(s.node_count, 3);
        assert_eq!(s.edge_count, 2);
        assert_eq!(s.category_count, 2);
        assert_eq!(s.root_count, 1);
        assert_eq!(s.leaf_count, 1);
        assert_eq!(s.isolated_node_count, 0);
        assert_eq!(s.scc_count, 3);
        assert_eq!(s.weakly_connected_component_count, 1);
        assert!((s.density - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn isolated_and_disjoint_components() {
        let s = stats_of(&[("A", &["B"]), ("C", &[]), ("D", &["E"])]);
        assert_eq!(s.isolated_node_count, 1);
        assert_eq!(s.weakly_connected_component_count, 3);
    }

    #[test]
    fn cycle_is_counted() {
        let s = stats_of(&[("A", &["B"]), ("B", &["A"])]);
        assert_eq!(s.cycle_count, 1);
        assert_eq!(s.scc_count, 1);
        assert!(!s.is_acyclic());
    }

    #[test]
    fn max_degrees() {
        let s = stats_of(&[("Hub", &["A", "B", "C"]), ("X", &["A"])]);
        assert_eq!(s.max_in_degree, 3);
        assert_eq!(s.max_out_degree, 2);
    }
}
