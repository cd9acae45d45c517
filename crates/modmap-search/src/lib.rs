#![forbid(unsafe_code)]
//! modmap-search library.
//!
//! # Conventions
//!
//! - **Errors**: queries never fail; an unmatched query yields an empty list.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`).
//! - **Rebuilds**: a [`SearchIndex`] is immutable. When labels change,
//!   build a new one from the updated entries.

pub mod index;

pub use index::{EXACT_MATCH_BONUS, IndexEntry, MatchField, SearchHit, SearchIndex};
