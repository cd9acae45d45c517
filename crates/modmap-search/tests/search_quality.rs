//! Ranking and result-shape properties of the fuzzy index.

use std::collections::HashSet;

use modmap_search::{EXACT_MATCH_BONUS, IndexEntry, MatchField, SearchIndex};
use proptest::prelude::*;

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars().map(|c| c.to_ascii_lowercase());
    needle
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .all(|n| hay.any(|h| h == n))
}

fn arb_entries() -> impl Strategy<Value = Vec<IndexEntry>> {
    prop::collection::vec(
        ("[A-C][a-z]{1,4}\\.[A-Z][a-z]{1,6}", "[a-z]{1,8}"),
        0..30,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(id, label)| IndexEntry::new(id, label))
            .collect()
    })
}

fn mathlib_sample() -> SearchIndex {
    let entries = [
        ("Algebra.Group.Basic", "代数.群.Basic"),
        ("Algebra.Group.Defs", "代数.群.Defs"),
        ("Algebra.Ring.Basic", "代数.环.Basic"),
        ("Topology.Basic", "拓扑.Basic"),
        ("Topology.Algebra.Group", "拓扑.代数.群"),
        ("Order.Basic", "序.Basic"),
        ("Data.List.Basic", "数据.List.Basic"),
    ]
    .map(|(id, label)| IndexEntry::new(id, label));
    SearchIndex::build(&entries)
}

#[test]
fn full_id_query_puts_that_module_first() {
    let index = mathlib_sample();
    for id in ["Order.Basic", "Topology.Basic", "Algebra.Group.Defs"] {
        let hits = index.query(id);
        assert_eq!(hits.first().map(|h| h.id.as_str()), Some(id), "query {id}");
    }
}

#[test]
fn translated_label_is_searchable() {
    let index = mathlib_sample();
    let hits = index.query("拓扑");
    let found: HashSet<&str> = hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(found, HashSet::from(["Topology.Basic", "Topology.Algebra.Group"]));
    assert!(hits.iter().all(|h| h.field == MatchField::Label));
}

#[test]
fn abbreviation_finds_module() {
    let index = mathlib_sample();
    let hits = index.query("toalggr");
    assert_eq!(hits.first().map(|h| h.id.as_str()), Some("Topology.Algebra.Group"));
}

#[test]
fn rebuilt_index_sees_new_labels() {
    let before = SearchIndex::build(&[IndexEntry::new("Order.Basic", "Order.Basic")]);
    assert!(before.query("序").is_empty());

    let after = SearchIndex::build(&[IndexEntry::new("Order.Basic", "序.Basic")]);
    assert_eq!(after.query("序").len(), 1);
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    #[test]
    fn hits_are_unique_known_and_sorted(entries in arb_entries(), query in "[a-zA-Z.]{1,4}") {
        let index = SearchIndex::build(&entries);
        let hits = index.query(&query);

        let known: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        let mut seen = HashSet::new();
        for hit in &hits {
            prop_assert!(known.contains(hit.id.as_str()));
            prop_assert!(seen.insert(hit.id.clone()), "duplicate hit {}", hit.id);
        }
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn every_hit_contains_the_query_in_order(entries in arb_entries(), query in "[a-zA-Z.]{1,4}") {
        let index = SearchIndex::build(&entries);
        for hit in index.query(&query) {
            let field = match hit.field {
                MatchField::Id => &hit.id,
                MatchField::Label => &hit.label,
            };
            prop_assert!(is_subsequence(&query, field), "{} !~ {}", query, field);
        }
    }

    #[test]
    fn exact_id_query_scores_above_bonus(entries in arb_entries(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!entries.is_empty());
        let target = &entries[pick.index(entries.len())];
        let index = SearchIndex::build(&entries);
        let hits = index.query(&target.id);

        prop_assert!(hits.first().is_some_and(|h| h.score >= EXACT_MATCH_BONUS));
        prop_assert!(hits.iter().any(|h| h.id == target.id && h.score >= EXACT_MATCH_BONUS));
    }

    #[test]
    fn limit_is_a_prefix(entries in arb_entries(), query in "[a-z]{1,3}", limit in 0usize..10) {
        let index = SearchIndex::build(&entries);
        let all = index.query(&query);
        let limited = index.query_limited(&query, limit);
        prop_assert_eq!(limited.len(), all.len().min(limit));
        prop_assert_eq!(&all[..limited.len()], &limited[..]);
    }
}
