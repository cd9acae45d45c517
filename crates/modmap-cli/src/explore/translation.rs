//! Background loading of label translation tables.
//!
//! # Overview
//!
//! A translation lives at `<source>/<language>.json`, where `source` is a
//! directory or an `http(s)://` base URL. Fetching runs on a worker thread so
//! graph construction and layout never wait on it; the result comes back over
//! an mpsc channel.
//!
//! Every [`TranslationLoader::request`] bumps a generation counter and tags
//! the fetch with it. Only a result carrying the newest generation is handed
//! out; anything older is dropped, so a slow fetch for a language the user
//! has already switched away from can never overwrite newer labels.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use modmap_core::{ModmapError, TranslationTable};
use tracing::{debug, info, instrument, warn};

/// Where translation files are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationSource {
    Directory(PathBuf),
    Http(String),
}

impl TranslationSource {
    /// Interpret a configured source. Relative directories resolve against
    /// `base`.
    pub fn parse(source: &str, base: &Path) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::Http(source.trim_end_matches('/').to_string())
        } else {
            Self::Directory(base.join(source))
        }
    }

    /// Fetch and parse the table for `language`, blocking.
    ///
    /// # Errors
    ///
    /// [`ModmapError::TranslationUnavailable`] when the language code is not
    /// a plain identifier or the resource can't be read;
    /// [`ModmapError::InvalidTranslation`] when it isn't a string map.
    #[instrument(skip(self, timeout))]
    pub fn fetch(&self, language: &str, timeout: Duration) -> Result<TranslationTable, ModmapError> {
        if !is_language_code(language) {
            return Err(unavailable(language, "language code must be alphanumeric, '-' or '_'"));
        }

        let text = match self {
            Self::Directory(dir) => {
                let path = dir.join(format!("{language}.json"));
                std::fs::read_to_string(&path)
                    .map_err(|err| unavailable(language, format!("{}: {err}", path.display())))?
            }
            Self::Http(base) => {
                let url = format!("{base}/{language}.json");
                ureq::get(&url)
                    .timeout(timeout)
                    .set("User-Agent", "modmap-cli")
                    .call()
                    .map_err(|err| unavailable(language, format!("{url}: {err}")))?
                    .into_string()
                    .map_err(|err| unavailable(language, format!("{url}: {err}")))?
            }
        };

        let table = TranslationTable::from_json_str(&text, language)?;
        debug!(entries = table.len(), "translation parsed");
        Ok(table)
    }
}

fn is_language_code(language: &str) -> bool {
    !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn unavailable(language: &str, reason: impl Into<String>) -> ModmapError {
    ModmapError::TranslationUnavailable {
        language: language.to_string(),
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// TranslationLoader
// ---------------------------------------------------------------------------

/// A translation that finished loading for the newest request.
#[derive(Debug)]
pub struct LoadedTranslation {
    pub language: String,
    pub table: TranslationTable,
}

struct Delivery {
    generation: u64,
    language: String,
    result: Result<TranslationTable, ModmapError>,
}

/// Runs translation fetches off the event loop, last request wins.
pub struct TranslationLoader {
    source: Arc<TranslationSource>,
    timeout: Duration,
    generation: u64,
    pending: bool,
    tx: Sender<Delivery>,
    rx: Receiver<Delivery>,
}

impl TranslationLoader {
    pub fn new(source: TranslationSource, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: Arc::new(source),
            timeout,
            generation: 0,
            pending: false,
            tx,
            rx,
        }
    }

    /// Start fetching `language`, superseding any request still in flight.
    /// Returns the request's generation.
    pub fn request(&mut self, language: &str) -> u64 {
        self.generation += 1;
        self.pending = true;
        let generation = self.generation;
        let language = language.to_string();
        info!(%language, generation, "translation requested");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let timeout = self.timeout;
        let worker_language = language.clone();
        let spawned = thread::Builder::new()
            .name(format!("modmap-translation-{generation}"))
            .spawn(move || {
                let result = source.fetch(&worker_language, timeout);
                // The loader may be gone; nobody wants the result then.
                let _ = tx.send(Delivery {
                    generation,
                    language: worker_language,
                    result,
                });
            });

        if let Err(err) = spawned {
            let _ = self.tx.send(Delivery {
                generation,
                result: Err(unavailable(&language, format!("failed to start fetch: {err}"))),
                language,
            });
        }
        generation
    }

    /// `true` while the newest request has not been handed out yet.
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Non-blocking: the newest request's result, if it has arrived.
    pub fn poll(&mut self) -> Option<Result<LoadedTranslation, ModmapError>> {
        let mut newest = None;
        while let Ok(delivery) = self.rx.try_recv() {
            if let Some(result) = self.accept(delivery) {
                newest = Some(result);
            }
        }
        newest
    }

    /// Block up to `timeout` for the newest request's result. `None` when
    /// nothing is pending or the time runs out.
    pub fn wait(&mut self, timeout: Duration) -> Option<Result<LoadedTranslation, ModmapError>> {
        if let Some(result) = self.poll() {
            return Some(result);
        }
        let deadline = Instant::now() + timeout;
        while self.pending {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(delivery) => {
                    if let Some(result) = self.accept(delivery) {
                        return Some(result);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(generation = self.generation, ?timeout, "translation still loading");
                    return None;
                }
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
        None
    }

    fn accept(&mut self, delivery: Delivery) -> Option<Result<LoadedTranslation, ModmapError>> {
        if delivery.generation != self.generation {
            debug!(
                stale = delivery.generation,
                newest = self.generation,
                language = %delivery.language,
                "discarding stale translation"
            );
            return None;
        }
        self.pending = false;
        let language = delivery.language;
        Some(match delivery.result {
            Ok(table) => {
                info!(%language, entries = table.len(), "translation loaded");
                Ok(LoadedTranslation { language, table })
            }
            Err(err) => {
                warn!(%language, error = %err, "translation failed; keeping current labels");
                Err(err)
            }
        })
    }
}
