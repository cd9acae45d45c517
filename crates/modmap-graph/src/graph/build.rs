//! Graph construction from raw adjacency data.
//!
//! # Overview
//!
//! The extractor records, for each module, the list of modules it imports.
//! This module turns that mapping into a [`petgraph`] directed graph suitable
//! for degree counting, statistics, and the presentation layer.
//!
//! ## Edge Direction
//!
//! An edge `A → B` in the graph means "A **is imported by** B": A is the
//! dependency, B the dependent. So for an adjacency entry
//! `"B": ["A", ...]` we insert edge `A → B`.
//!
//! ## Node Order
//!
//! Nodes are added in first-seen order while walking the adjacency keys in
//! file order (each key before its own dependency list), so petgraph's node
//! indices double as the default display order.
//!
//! ## Multiplicity
//!
//! Edges are inserted exactly as the raw data encodes them. A dependency
//! listed twice yields two parallel edges and self-imports yield self-loops;
//! nothing is invented and nothing is filtered, so degree totals always
//! match the raw data.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use modmap_core::Adjacency;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::graph::degree::{Degree, DegreeTable};

// ---------------------------------------------------------------------------
// ModuleGraph
// ---------------------------------------------------------------------------

/// A directed module dependency graph.
///
/// Nodes are module ids. An edge `A → B` means "A is imported by B".
///
/// The graph may contain cycles; nothing downstream assumes a DAG.
/// Built once per data load and immutable afterwards.
#[derive(Debug)]
pub struct ModuleGraph {
    /// Directed graph: nodes = module ids, edges = dependency → dependent.
    pub graph: DiGraph<String, ()>,
    /// Mapping from module id to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// BLAKE3 hash of the ordered edge list.
    pub content_hash: String,
    degrees: DegreeTable,
}

impl ModuleGraph {
    /// Build a [`ModuleGraph`] from adjacency data.
    ///
    /// Every key and every referenced id becomes a node exactly once. For
    /// each key `k` and each `dep` in its list, the edge `dep → k` is added.
    /// Ids referenced but never listed as keys become leaf nodes.
    #[must_use]
    #[instrument(skip(adjacency), fields(keys = adjacency.len()))]
    pub fn from_adjacency(adjacency: &Adjacency) -> Self {
        let mut graph = DiGraph::<String, ()>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(adjacency.len());

        // Step 1: nodes in first-seen order.
        for (id, deps) in adjacency.iter() {
            intern(&mut graph, &mut node_map, id);
            for dep in deps {
                intern(&mut graph, &mut node_map, dep);
            }
        }

        // Step 2: edges in input order, dependency → dependent.
        let mut edge_pairs: Vec<(&str, &str)> = Vec::new();
        for (id, deps) in adjacency.iter() {
            let dependent = node_map[id];
            for dep in deps {
                graph.add_edge(node_map[dep.as_str()], dependent, ());
                edge_pairs.push((dep.as_str(), id));
            }
        }

        let content_hash = compute_edge_hash(&edge_pairs);
        let degrees = DegreeTable::from_edges(
            graph.node_weights().map(String::as_str),
            edge_pairs.iter().copied(),
        );

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "module graph built"
        );

        Self {
            graph,
            node_map,
            content_hash,
            degrees,
        }
    }

    /// Return the number of nodes (modules) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges (import relationships) in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Module ids in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// `(dependency, dependent)` pairs in input order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Look up the `NodeIndex` for a module id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Return the module id for a node.
    #[must_use]
    pub fn module_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// In/out degree of `id`; zero for unknown ids.
    #[must_use]
    pub fn degree(&self, id: &str) -> Degree {
        self.degrees.degree(id)
    }

    /// The precomputed degree table.
    #[must_use]
    pub const fn degrees(&self) -> &DegreeTable {
        &self.degrees
    }

    /// Modules that `id` imports (sources of its incoming edges), distinct,
    /// in input order. Empty for unknown ids.
    #[must_use]
    pub fn dependencies_of(&self, id: &str) -> Vec<&str> {
        self.neighbours(id, Direction::Incoming)
    }

    /// Modules that import `id` (targets of its outgoing edges), distinct,
    /// in input order. Empty for unknown ids.
    #[must_use]
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.neighbours(id, Direction::Outgoing)
    }

    fn neighbours(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(idx) = self.node_index(id) else {
            return Vec::new();
        };
        // petgraph walks adjacency lists newest-first; flip to input order.
        let mut ordered: Vec<NodeIndex> = self.graph.neighbors_directed(idx, direction).collect();
        ordered.reverse();

        let mut seen = HashSet::new();
        ordered
            .into_iter()
            .filter(|n| seen.insert(*n))
            .filter_map(|n| self.module_id(n))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn intern(graph: &mut DiGraph<String, ()>, node_map: &mut HashMap<String, NodeIndex>, id: &str) {
    if !node_map.contains_key(id) {
        let idx = graph.add_node(id.to_string());
        node_map.insert(id.to_string(), idx);
    }
}

/// Compute a BLAKE3 hash of the ordered edge list.
fn compute_edge_hash(edges: &[(&str, &str)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for (dependency, dependent) in edges {
        hasher.update(dependency.as_bytes());
        hasher.update(b"\x00");
        hasher.update(dependent.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
