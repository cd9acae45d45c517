//! Topological linearization and layout ranks.
//!
//! # Algorithm
//!
//! A depth-first post-order walk over the raw adjacency mapping:
//!
//! 1. Start a walk from every not-yet-visited key, in key order.
//! 2. On entering a module, mark it visited, then descend into each
//!    not-yet-visited module of its dependency list, in list order.
//! 3. Emit the module once all of its dependencies have been handled.
//!
//! Emitting on finish yields dependencies before dependents, which is the
//! left-to-right layout order. This is the reverse of the classic "prepend
//! on finish" topological stack; the tie-breaks (key order, list order) are
//! identical, so the result is deterministic for identical input.
//!
//! # Cycles
//!
//! A visited module is never re-entered, so the walk terminates on cyclic
//! input, but the result is then only a best-effort linearization: some
//! edges inside a cycle point backwards. No cycle breaking is attempted; see
//! [`backward_edges`] to find the affected edges.
//!
//! # Stack depth
//!
//! The walk keeps its own frame stack instead of recursing, so very long
//! import chains cannot overflow the thread stack. The frame stack replays
//! the recursive visit order exactly.

use std::collections::{HashMap, HashSet};

use modmap_core::Adjacency;
use tracing::{debug, instrument};

use crate::graph::ModuleGraph;

/// One pending module on the explicit DFS stack: the module and the index of
/// the next dependency to look at.
struct Frame<'a> {
    id: &'a str,
    deps: &'a [String],
    next: usize,
}

/// Linearize every module of `adjacency`, dependencies first.
///
/// Covers every key and every referenced id exactly once.
#[must_use]
#[instrument(skip(adjacency), fields(keys = adjacency.len()))]
pub fn topological_order(adjacency: &Adjacency) -> Vec<String> {
    let mut visited: HashSet<&str> = HashSet::with_capacity(adjacency.len());
    let mut order: Vec<String> = Vec::with_capacity(adjacency.len());
    let mut stack: Vec<Frame<'_>> = Vec::new();

    let deps_of = |id: &str| adjacency.dependencies(id).unwrap_or(&[]);

    for root in adjacency.keys() {
        if !visited.insert(root) {
            continue;
        }
        stack.push(Frame {
            id: root,
            deps: deps_of(root),
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let deps = frame.deps;
            if let Some(dep) = deps.get(frame.next) {
                frame.next += 1;
                let dep = dep.as_str();
                if visited.insert(dep) {
                    stack.push(Frame {
                        id: dep,
                        deps: deps_of(dep),
                        next: 0,
                    });
                }
            } else {
                order.push(frame.id.to_string());
                stack.pop();
            }
        }
    }

    debug!(modules = order.len(), "topological order computed");
    order
}

/// Edges `(dependency, dependent)` whose dependency lands at or after its
/// dependent in `order`. Empty for acyclic input.
#[must_use]
pub fn backward_edges<'g>(graph: &'g ModuleGraph, ranks: &RankTable) -> Vec<(&'g str, &'g str)> {
    graph
        .edges()
        .filter(|(dependency, dependent)| {
            match (ranks.position(dependency), ranks.position(dependent)) {
                (Some(a), Some(b)) => a >= b,
                _ => false,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// RankTable
// ---------------------------------------------------------------------------

/// Position of every module in a linearization, normalized for layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankTable {
    order: Vec<String>,
    positions: HashMap<String, usize>,
}

impl RankTable {
    /// Index a linearization such as the output of [`topological_order`].
    #[must_use]
    pub fn from_order(order: Vec<String>) -> Self {
        let positions = order
            .iter()
            .enumerate()
            .map(|(pos, id)| (id.clone(), pos))
            .collect();
        Self { order, positions }
    }

    /// Compute the topological order of `adjacency` and index it.
    #[must_use]
    pub fn from_adjacency(adjacency: &Adjacency) -> Self {
        Self::from_order(topological_order(adjacency))
    }

    /// Index of `id` in the order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// `position / total`, in `[0, 1)`; `None` for unknown ids.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rank(&self, id: &str) -> Option<f64> {
        let total = self.order.len();
        self.position(id).map(|pos| pos as f64 / total as f64)
    }

    /// The linearization, dependencies first.
    #[must_use]
    pub fn order(&self) -> &[String] {
        &self.order
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn adj(pairs: &[(&str, &[&str])]) -> Adjacency {
        Adjacency::from_pairs(pairs.iter().map(|(k, v)| (*k, v.iter().copied())))
    }

    #[test]
    fn two_module_example_orders_dependency_first() {
        let order = topological_order(&adj(&[("A.X", &["B.Y"]), ("B.Y", &[])]));
        assert_eq!(order, vec!["B.Y", "A.X"]);
    }

    #[test]
    fn empty_input_gives_empty_order() {
        assert!(topological_order(&Adjacency::new()).is_empty());
        let ranks = RankTable::from_adjacency(&Adjacency::new());
        assert!(ranks.is_empty());
        assert_eq!(ranks.rank("A"), None);
    }

    #[test]
    fn leaf_only_ids_are_included() {
        let order = topological_order(&adj(&[("A", &["Leaf1", "Leaf2"])]));
        assert_eq!(order, vec!["Leaf1", "Leaf2", "A"]);
    }

    #[test]
    fn tie_break_follows_key_then_list_order() {
        // Keys: C, A, B. C has no deps, A depends on B.
        let order = topological_order(&adj(&[("C", &[]), ("A", &["B"]), ("B", &[])]));
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn diamond_matches_recursive_post_order() {
        //   Top imports L and R, both import Base.
        let order = topological_order(&adj(&[
            ("Top", &["L", "R"]),
            ("L", &["Base"]),
            ("R", &["Base"]),
        ]));
        assert_eq!(order, vec!["Base", "L", "R", "Top"]);
    }

    #[test]
    fn cycle_terminates_and_covers_every_node() {
        let order = topological_order(&adj(&[("A", &["B"]), ("B", &["C"]), ("C", &["A"])]));
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn self_loop_terminates() {
        let order = topological_order(&adj(&[("A", &["A", "B"])]));
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let n = 200_000;
        let mut adjacency = Adjacency::new();
        for i in 0..n {
            let deps = if i + 1 < n {
                vec![format!("M.{}", i + 1)]
            } else {
                vec![]
            };
            adjacency.insert(format!("M.{i}"), deps);
        }
        let order = topological_order(&adjacency);
        assert_eq!(order.len(), n);
        assert_eq!(order.first().map(String::as_str), Some("M.199999"));
        assert_eq!(order.last().map(String::as_str), Some("M.0"));
    }

    #[test]
    fn rank_is_position_over_total() {
        let ranks = RankTable::from_adjacency(&adj(&[("A", &["B"]), ("B", &["C"])]));
        assert_eq!(ranks.order(), ["C", "B", "A"]);
        assert_eq!(ranks.position("C"), Some(0));
        assert_eq!(ranks.rank("C"), Some(0.0));
        let b = ranks.rank("B").expect("B ranked");
        assert!((b - 1.0 / 3.0).abs() < 1e-12);
        let a = ranks.rank("A").expect("A ranked");
        assert!((a - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn backward_edges_only_on_cycles() {
        let acyclic = adj(&[("A", &["B"]), ("B", &["C"])]);
        let graph = ModuleGraph::from_adjacency(&acyclic);
        let ranks = RankTable::from_adjacency(&acyclic);
        assert!(backward_edges(&graph, &ranks).is_empty());

        let cyclic = adj(&[("A", &["B"]), ("B", &["A"])]);
        let graph = ModuleGraph::from_adjacency(&cyclic);
        let ranks = RankTable::from_adjacency(&cyclic);
        // Order is [B, A]: edge B → A is forward, A → B points back.
        assert_eq!(backward_edges(&graph, &ranks), vec![("A", "B")]);
    }
}
