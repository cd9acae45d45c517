//! Presentation adapter: turns the graph engine's output into renderer
//! records and view events into view commands.
//!
//! # Pipeline
//!
//! ```text
//! Adjacency ─► ModuleGraph ─► RankTable ─► layout (RenderNode/RenderLink)
//!                                              │
//!                                              ├─► SearchIndex
//!                                              ▼
//! ViewEvent ─► ExploreAdapter ─► NavigationHistory
//!                   │
//!                   └─► ViewCommand ─► CommandSink(s)
//! ```
//!
//! Translations arrive asynchronously through [`TranslationLoader`] and are
//! applied with [`ExploreAdapter::apply_translation`].

pub mod adapter;
pub mod events;
pub mod layout;
pub mod translation;

pub use adapter::ExploreAdapter;
pub use events::{NodeInfo, ViewCommand, ViewEvent};
pub use layout::GraphExport;
pub use translation::{LoadedTranslation, TranslationLoader, TranslationSource};
