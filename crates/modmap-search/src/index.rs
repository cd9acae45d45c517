//! Fuzzy index over module ids and display labels.
//!
//! # Overview
//!
//! Every entry is scored against the query on both its id and its label
//! with skim's V2 subsequence scorer. The better of the two wins, so a module
//! shows up at most once in the results. Query characters must appear in
//! order in the matched field, and gaps between them cost points, so
//! `alggrp` still finds `Algebra.Group` but ranks it below a tighter hit.
//!
//! # Ranking
//!
//! 1. Score, descending. An exact (case-insensitive) hit on id or label
//!    adds [`EXACT_MATCH_BONUS`], so typing a full id always puts it first.
//! 2. Shorter id first.
//! 3. Build order.
//!
//! The index never changes after [`SearchIndex::build`]; when labels are
//! translated, build a fresh index from the new entries.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::Serialize;
use tracing::{debug, instrument};

/// Added to the fuzzy score when the query equals the id or label, ignoring
/// case. Far above any score skim hands out for realistic module names.
pub const EXACT_MATCH_BONUS: i64 = 100_000;

/// One searchable module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: String,
    pub label: String,
}

impl IndexEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Which field produced a hit's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Id,
    Label,
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub label: String,
    pub score: i64,
    pub field: MatchField,
}

// ---------------------------------------------------------------------------
// SearchIndex
// ---------------------------------------------------------------------------

pub struct SearchIndex {
    entries: Vec<IndexEntry>,
    matcher: SkimMatcherV2,
}

impl fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchIndex")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl SearchIndex {
    /// Index `entries`. A repeated id keeps its first entry.
    #[must_use]
    #[instrument(skip(entries), fields(entries = entries.len()))]
    pub fn build(entries: &[IndexEntry]) -> Self {
        let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
        let entries: Vec<IndexEntry> = entries
            .iter()
            .filter(|entry| seen.insert(entry.id.as_str()))
            .cloned()
            .collect();
        debug!(indexed = entries.len(), "search index built");
        Self {
            entries,
            matcher: SkimMatcherV2::default(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All hits for `text`, best first. Empty for a blank query.
    #[must_use]
    pub fn query(&self, text: &str) -> Vec<SearchHit> {
        let query = text.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &IndexEntry, i64, MatchField)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(pos, entry)| {
                self.score_entry(entry, query)
                    .map(|(score, field)| (pos, entry, score, field))
            })
            .collect();

        scored.sort_by_key(|(pos, entry, score, _)| (Reverse(*score), entry.id.len(), *pos));

        debug!(query, hits = scored.len(), "search");
        scored
            .into_iter()
            .map(|(_, entry, score, field)| SearchHit {
                id: entry.id.clone(),
                label: entry.label.clone(),
                score,
                field,
            })
            .collect()
    }

    /// At most `limit` hits for `text`, best first.
    #[must_use]
    pub fn query_limited(&self, text: &str, limit: usize) -> Vec<SearchHit> {
        let mut hits = self.query(text);
        hits.truncate(limit);
        hits
    }

    /// Best of the id and label scores; the id wins ties.
    fn score_entry(&self, entry: &IndexEntry, query: &str) -> Option<(i64, MatchField)> {
        let id = self.score_field(&entry.id, query);
        let label = self.score_field(&entry.label, query);
        match (id, label) {
            (Some(i), Some(l)) if l > i => Some((l, MatchField::Label)),
            (Some(i), _) => Some((i, MatchField::Id)),
            (None, Some(l)) => Some((l, MatchField::Label)),
            (None, None) => None,
        }
    }

    fn score_field(&self, text: &str, query: &str) -> Option<i64> {
        let fuzzy = self
            .matcher
            .fuzzy_match(text, query)
            .or_else(|| {
                self.matcher
                    .fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase())
            })?;
        if text.eq_ignore_ascii_case(query) {
            Some(fuzzy + EXACT_MATCH_BONUS)
        } else {
            Some(fuzzy)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
