#![forbid(unsafe_code)]
//! modmap-core library.
//!
//! Shared building blocks for the modmap workspace: the raw adjacency input
//! model, module-id helpers, the category styling table, translation tables,
//! the navigation history, configuration and error codes.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::ModmapError`] at public seams, `anyhow::Result`
//!   with context where I/O is involved.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod adjacency;
pub mod category;
pub mod config;
pub mod error;
pub mod history;
pub mod labels;
pub mod module_id;

pub use adjacency::Adjacency;
pub use category::{CategoryStyle, CategoryTable};
pub use error::{ErrorCode, ModmapError};
pub use history::NavigationHistory;
pub use labels::TranslationTable;
