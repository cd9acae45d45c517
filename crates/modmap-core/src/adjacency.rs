//! Raw adjacency input: module id → ordered list of the ids it imports.
//!
//! # Overview
//!
//! The external extractor emits a JSON object whose keys are module ids and
//! whose values are arrays of module ids that the key imports:
//!
//! ```json
//! {
//!   "Algebra.Group.Basic": ["Order.Basic", "Init.Core"],
//!   "Order.Basic": []
//! }
//! ```
//!
//! Key order matters downstream (layout ranks are derived from a DFS that
//! starts from each key in file order), so [`Adjacency`] keeps insertion
//! order instead of collecting into a `HashMap`.
//!
//! Ids listed as dependencies need not appear as keys; such ids are leaf
//! modules with no recorded imports.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use tracing::{debug, instrument};

use crate::error::ModmapError;
use crate::module_id::in_namespaces;

/// Insertion-ordered mapping from module id to the ids it depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl Adjacency {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the dependency list of `id`.
    ///
    /// A repeated key keeps its original position and takes the new list,
    /// matching how JSON objects treat duplicate keys.
    pub fn insert(&mut self, id: impl Into<String>, dependencies: Vec<String>) {
        let id = id.into();
        if let Some(&pos) = self.index.get(&id) {
            self.entries[pos].1 = dependencies;
        } else {
            self.index.insert(id.clone(), self.entries.len());
            self.entries.push((id, dependencies));
        }
    }

    /// Build from `(id, deps)` pairs, e.g. in tests.
    #[must_use]
    pub fn from_pairs<I, K, D>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        let mut adjacency = Self::new();
        for (id, deps) in pairs {
            adjacency.insert(id, deps.into_iter().map(Into::into).collect());
        }
        adjacency
    }

    /// Parse the extractor's JSON output.
    ///
    /// # Errors
    ///
    /// Returns [`ModmapError::InvalidData`] if `text` is not a JSON object
    /// mapping strings to arrays of strings. `origin` is only used in the
    /// error message.
    pub fn from_json_str(text: &str, origin: &Path) -> Result<Self, ModmapError> {
        serde_json::from_str(text).map_err(|err| ModmapError::InvalidData {
            path: origin.to_path_buf(),
            reason: err.to_string(),
        })
    }

    /// Load the data file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ModmapError::DataFileMissing`] when the file does not exist,
    /// [`ModmapError::Io`] when it cannot be read, and
    /// [`ModmapError::InvalidData`] when it does not parse.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, ModmapError> {
        if !path.exists() {
            return Err(ModmapError::DataFileMissing {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ModmapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let adjacency = Self::from_json_str(&text, path)?;
        debug!(modules = adjacency.len(), "loaded adjacency data");
        Ok(adjacency)
    }

    /// Drop every key and every dependency rooted in one of `roots`.
    ///
    /// The extractor already filters a fixed ignore-list; this re-applies a
    /// configured list so data produced by other tools can be narrowed the
    /// same way.
    #[must_use]
    pub fn without_namespaces(&self, roots: &[String]) -> Self {
        if roots.is_empty() {
            return self.clone();
        }
        let mut filtered = Self::new();
        for (id, deps) in &self.entries {
            if in_namespaces(id, roots) {
                continue;
            }
            let kept = deps
                .iter()
                .filter(|dep| !in_namespaces(dep, roots))
                .cloned()
                .collect();
            filtered.insert(id.clone(), kept);
        }
        filtered
    }

    /// Number of keys (modules with a recorded import list).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, dependencies)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(id, deps)| (id.as_str(), deps.as_slice()))
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Dependency list of `id`, or `None` if `id` is not a key.
    #[must_use]
    pub fn dependencies(&self, id: &str) -> Option<&[String]> {
        self.index
            .get(id)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    #[must_use]
    pub fn contains_key(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}

impl<'de> Deserialize<'de> for Adjacency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AdjacencyVisitor;

        impl<'de> Visitor<'de> for AdjacencyVisitor {
            type Value = Adjacency;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping module ids to arrays of module ids")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut adjacency = Adjacency::new();
                while let Some((id, deps)) = map.next_entry::<String, Vec<String>>()? {
                    adjacency.insert(id, deps);
                }
                Ok(adjacency)
            }
        }

        deserializer.deserialize_map(AdjacencyVisitor)
    }
}
