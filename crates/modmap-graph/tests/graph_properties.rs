//! Property tests for graph construction and ranking.
//!
//! Random adjacency maps over a small id alphabet, so that cycles, self-loops,
//! repeated dependencies and dangling references all show up regularly.

use std::collections::{BTreeSet, HashSet};

use modmap_core::Adjacency;
use modmap_graph::{ModuleGraph, RankTable, topological_order};
use proptest::prelude::*;

fn arb_id() -> impl Strategy<Value = String> {
    "[A-D]\\.[a-f]"
}

fn arb_adjacency(max_keys: usize) -> impl Strategy<Value = Adjacency> {
    prop::collection::vec((arb_id(), prop::collection::vec(arb_id(), 0..5)), 0..max_keys)
        .prop_map(Adjacency::from_pairs)
}

/// Acyclic adjacency: module `i` only imports modules with a larger index,
/// keys emitted in a shuffled-looking but deterministic order.
fn arb_dag() -> impl Strategy<Value = Adjacency> {
    (2usize..24).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0..n, 0..4), n).prop_map(move |lists| {
            let mut adjacency = Adjacency::new();
            for (i, deps) in lists.into_iter().enumerate().rev() {
                let deps = deps
                    .into_iter()
                    .filter(|&d| d > i)
                    .map(|d| format!("M.{d}"))
                    .collect();
                adjacency.insert(format!("M.{i}"), deps);
            }
            adjacency
        })
    })
}

fn all_ids(adjacency: &Adjacency) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    for (id, deps) in adjacency.iter() {
        ids.insert(id.to_string());
        ids.extend(deps.iter().cloned());
    }
    ids
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(1000))]

    #[test]
    fn every_referenced_id_is_a_node_exactly_once(adjacency in arb_adjacency(12)) {
        let graph = ModuleGraph::from_adjacency(&adjacency);
        let nodes: Vec<&str> = graph.nodes().collect();
        let distinct: HashSet<&str> = nodes.iter().copied().collect();
        prop_assert_eq!(nodes.len(), distinct.len(), "duplicate node");

        let expected = all_ids(&adjacency);
        let actual: BTreeSet<String> = nodes.iter().map(|s| (*s).to_string()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn edge_count_matches_raw_lists(adjacency in arb_adjacency(12)) {
        let graph = ModuleGraph::from_adjacency(&adjacency);
        let raw: usize = adjacency.iter().map(|(_, deps)| deps.len()).sum();
        prop_assert_eq!(graph.edge_count(), raw);
    }

    #[test]
    fn degrees_sum_to_size_metric_and_edge_count(adjacency in arb_adjacency(12)) {
        let graph = ModuleGraph::from_adjacency(&adjacency);
        let mut in_total = 0;
        let mut out_total = 0;
        for id in graph.nodes() {
            let d = graph.degree(id);
            prop_assert_eq!(d.in_degree + d.out_degree, graph.degrees().size_metric(id));
            in_total += d.in_degree;
            out_total += d.out_degree;
        }
        prop_assert_eq!(in_total, graph.edge_count());
        prop_assert_eq!(out_total, graph.edge_count());
    }

    #[test]
    fn order_covers_every_node_once(adjacency in arb_adjacency(12)) {
        let order = topological_order(&adjacency);
        let distinct: HashSet<&String> = order.iter().collect();
        prop_assert_eq!(distinct.len(), order.len());

        let covered: BTreeSet<String> = order.into_iter().collect();
        prop_assert_eq!(covered, all_ids(&adjacency));
    }

    #[test]
    fn order_is_deterministic(adjacency in arb_adjacency(12)) {
        prop_assert_eq!(topological_order(&adjacency), topological_order(&adjacency.clone()));
    }

    #[test]
    fn acyclic_input_orders_dependencies_first(adjacency in arb_dag()) {
        let graph = ModuleGraph::from_adjacency(&adjacency);
        let ranks = RankTable::from_adjacency(&adjacency);
        for (dependency, dependent) in graph.edges() {
            let a = ranks.position(dependency);
            let b = ranks.position(dependent);
            prop_assert!(a.is_some() && b.is_some());
            prop_assert!(a < b, "{} must precede {}", dependency, dependent);
        }
    }

    #[test]
    fn ranks_are_in_unit_interval(adjacency in arb_adjacency(12)) {
        let ranks = RankTable::from_adjacency(&adjacency);
        for id in ranks.order() {
            let r = ranks.rank(id).unwrap_or(-1.0);
            prop_assert!((0.0..1.0).contains(&r));
        }
    }
}
