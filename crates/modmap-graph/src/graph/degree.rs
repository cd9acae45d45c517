//! Per-module degree counts.
//!
//! Degrees are accumulated in a single pass over the edge list. Every module
//! is seeded to zero first, so a module with no edges in either direction
//! still has an entry and lookups never come back empty-handed.

use std::collections::HashMap;

use serde::Serialize;

/// In/out degree of one module.
///
/// `in_degree` counts the module's imports (edges pointing at it);
/// `out_degree` counts the modules importing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Degree {
    pub in_degree: usize,
    pub out_degree: usize,
}

impl Degree {
    /// Size metric used for node sizing: `in_degree + out_degree`.
    #[must_use]
    pub const fn total(self) -> usize {
        self.in_degree + self.out_degree
    }
}

/// Degree lookup for every module in a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeTable {
    degrees: HashMap<String, Degree>,
}

impl DegreeTable {
    /// Count degrees over `edges` (`(dependency, dependent)` pairs), seeding
    /// every id in `nodes` and every edge endpoint to zero first.
    pub fn from_edges<'a>(
        nodes: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut degrees: HashMap<String, Degree> = nodes
            .into_iter()
            .map(|id| (id.to_string(), Degree::default()))
            .collect();

        for (dependency, dependent) in edges {
            degrees.entry(dependency.to_string()).or_default().out_degree += 1;
            degrees.entry(dependent.to_string()).or_default().in_degree += 1;
        }

        Self { degrees }
    }

    /// Degree of `id`; zero in both directions when `id` is unknown.
    #[must_use]
    pub fn degree(&self, id: &str) -> Degree {
        self.degrees.get(id).copied().unwrap_or_default()
    }

    /// Size metric of `id` (`in_degree + out_degree`).
    #[must_use]
    pub fn size_metric(&self, id: &str) -> usize {
        self.degree(id).total()
    }

    /// Largest size metric in the table (0 when empty).
    #[must_use]
    pub fn max_size_metric(&self) -> usize {
        self.degrees.values().map(|d| d.total()).max().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Degree)> {
        self.degrees.iter().map(|(id, d)| (id.as_str(), *d))
    }
}
