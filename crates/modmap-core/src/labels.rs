//! Translation tables for display labels.
//!
//! A translation resource is a flat JSON object mapping either a full module
//! id or a single id segment to a display string. Labels are always derived
//! from the raw id, never from a previously translated label, so applying a
//! new table fully replaces the old labels.
//!
//! # Lookup rule
//!
//! 1. A non-empty entry for the full id wins.
//! 2. Otherwise every segment with a non-empty entry is replaced and the
//!    segments are re-joined with `.`.
//! 3. An empty result falls back to the raw id.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ModmapError;
use crate::module_id::segments;

/// Mapping from id or id segment to display string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    #[must_use]
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Parse a translation resource for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`ModmapError::InvalidTranslation`] if `text` is not a JSON
    /// object of string values.
    pub fn from_json_str(text: &str, language: &str) -> Result<Self, ModmapError> {
        serde_json::from_str(text).map_err(|err| ModmapError::InvalidTranslation {
            language: language.to_string(),
            reason: err.to_string(),
        })
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Display label for the raw module id `id`.
    #[must_use]
    pub fn label_for(&self, id: &str) -> String {
        if let Some(full) = self.lookup(id) {
            return full.to_string();
        }

        let joined = segments(id)
            .map(|segment| self.lookup(segment).unwrap_or(segment))
            .collect::<Vec<_>>()
            .join(".");

        if joined.is_empty() {
            id.to_string()
        } else {
            joined
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
}
