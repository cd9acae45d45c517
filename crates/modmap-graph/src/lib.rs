#![forbid(unsafe_code)]
//! modmap-graph library.
//!
//! Builds the module dependency graph from raw adjacency data and derives the
//! structural metrics used for layout: per-module degree, the topological
//! linearization behind horizontal ranks, and summary statistics.
//!
//! # Conventions
//!
//! - **Errors**: graph construction and ranking are total; nothing here fails.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod graph;
pub mod rank;

pub use graph::{Degree, DegreeTable, GraphStats, ModuleGraph};
pub use rank::{RankTable, topological_order};
