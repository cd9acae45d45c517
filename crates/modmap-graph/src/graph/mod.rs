//! Module dependency graph.
//!
//! # Overview
//!
//! This module turns the extractor's adjacency data into a petgraph-based
//! directed graph and answers the structural questions the presentation
//! layer asks about it.
//!
//! ## Pipeline
//!
//! ```text
//! Adjacency (id -> [ids it imports])
//!        ↓  build::ModuleGraph::from_adjacency()
//! ModuleGraph (DiGraph, edge = dependency → dependent, may contain cycles)
//!        ↓  degree::DegreeTable::from_graph()
//! DegreeTable (in/out degree per module)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, cycle count, roots, leaves, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use modmap_core::Adjacency;
//! use modmap_graph::graph::{ModuleGraph, DegreeTable, GraphStats};
//!
//! let adjacency = Adjacency::load(path)?;
//! let graph = ModuleGraph::from_adjacency(&adjacency);
//! let degrees = DegreeTable::from_graph(&graph);
//! let stats = GraphStats::from_graph(&graph);
//!
//! println!("modules={} imports={} cycles={}",
//!     stats.node_count, stats.edge_count, stats.cycle_count);
//! ```

pub mod build;
pub mod cycles;
pub mod degree;
pub mod stats;

pub use build::ModuleGraph;
pub use cycles::find_all_cycles;
pub use degree::{Degree, DegreeTable};
pub use stats::GraphStats;
