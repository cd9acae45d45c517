//! Loading shared by every data-backed command.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use modmap_core::config::EffectiveConfig;
use modmap_core::{Adjacency, ModmapError};
use tracing::{info, instrument};

use crate::explore::{ExploreAdapter, LoadedTranslation, TranslationLoader, TranslationSource};

/// Read the data file and drop ignored namespaces.
///
/// # Errors
///
/// Fails when the data file is missing, unreadable, or malformed.
#[instrument(skip(config))]
pub fn load_adjacency(data: &Path, config: &EffectiveConfig) -> Result<Adjacency> {
    let adjacency = Adjacency::load(data)
        .with_context(|| format!("loading dependency data from {}", data.display()))?;
    let ignored = &config.project.graph.ignore_namespaces;
    if ignored.is_empty() {
        return Ok(adjacency);
    }
    let filtered = adjacency.without_namespaces(ignored);
    info!(
        before = adjacency.len(),
        after = filtered.len(),
        ?ignored,
        "ignored namespaces dropped"
    );
    Ok(filtered)
}

/// Result of switching the label language.
#[derive(Debug)]
pub enum LanguageOutcome {
    Loaded { language: String, entries: usize },
    Failed { language: String, error: ModmapError },
    /// Still loading after the timeout; applied later if it arrives.
    Pending { language: String },
}

/// An [`ExploreAdapter`] plus the translation machinery feeding it.
pub struct Explorer {
    pub adapter: ExploreAdapter,
    loader: TranslationLoader,
    timeout: Duration,
    language: Option<String>,
}

impl Explorer {
    /// Load data, build the adapter and apply the configured language.
    ///
    /// The translation fetch starts before the graph is built and runs
    /// alongside it; labels are applied once both are done.
    ///
    /// # Errors
    ///
    /// Fails when the data file can't be loaded. Translation problems are
    /// logged and leave raw ids as labels.
    pub fn load(data: &Path, config: &EffectiveConfig, project_root: &Path) -> Result<Self> {
        let translation = &config.project.translation;
        let timeout = Duration::from_millis(translation.timeout_ms);
        let mut loader = TranslationLoader::new(
            TranslationSource::parse(&translation.source, project_root),
            timeout,
        );
        if let Some(language) = config.language.as_deref() {
            loader.request(language);
        }

        let adjacency = load_adjacency(data, config)?;
        let adapter = ExploreAdapter::new(&adjacency, &config.project);

        let mut explorer = Self {
            adapter,
            loader,
            timeout,
            language: None,
        };
        if let Some(language) = config.language.as_deref() {
            explorer.settle(language);
        }
        Ok(explorer)
    }

    /// Language whose labels are currently applied.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Request `language` and wait up to the configured timeout for it.
    pub fn switch_language(&mut self, language: &str) -> LanguageOutcome {
        self.loader.request(language);
        self.settle(language)
    }

    /// Apply a translation that finished after its wait timed out.
    pub fn poll_translation(&mut self) -> Option<LanguageOutcome> {
        if !self.loader.is_pending() {
            return None;
        }
        let result = self.loader.poll()?;
        Some(self.apply(result))
    }

    fn settle(&mut self, language: &str) -> LanguageOutcome {
        match self.loader.wait(self.timeout) {
            Some(result) => self.apply(result),
            None => LanguageOutcome::Pending {
                language: language.to_string(),
            },
        }
    }

    fn apply(&mut self, result: Result<LoadedTranslation, ModmapError>) -> LanguageOutcome {
        match result {
            Ok(loaded) => {
                self.adapter.apply_translation(&loaded.table);
                let entries = loaded.table.len();
                self.language = Some(loaded.language.clone());
                LanguageOutcome::Loaded {
                    language: loaded.language,
                    entries,
                }
            }
            Err(error) => {
                let language = match &error {
                    ModmapError::TranslationUnavailable { language, .. }
                    | ModmapError::InvalidTranslation { language, .. } => language.clone(),
                    _ => String::new(),
                };
                LanguageOutcome::Failed { language, error }
            }
        }
    }
}
