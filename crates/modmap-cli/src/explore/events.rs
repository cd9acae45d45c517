//! Events flowing in from the view and commands flowing back out.

use modmap_search::SearchHit;
use serde::Serialize;

/// User interaction reported by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    NodeClicked(String),
    CanvasClicked,
    SearchInput(String),
    HistoryBack,
    HistoryForward,
}

/// Panel payload describing one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    pub id: String,
    pub label: String,
    pub category: String,
    pub in_degree: usize,
    pub out_degree: usize,
    /// Normalized layout rank in `[0, 1)`.
    pub rank: f64,
    /// Modules this one imports.
    pub dependencies: Vec<String>,
    /// Modules importing this one.
    pub dependents: Vec<String>,
}

/// Instruction for the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewCommand {
    /// Centre the view on a node.
    FocusNode { id: String, x: f64, y: f64 },
    RenderPanel(NodeInfo),
    ClearPanel,
    SearchResults { query: String, hits: Vec<SearchHit> },
}

/// Observer receiving every [`ViewCommand`] the adapter emits.
pub trait CommandSink {
    fn deliver(&mut self, command: &ViewCommand);
}

impl<F> CommandSink for F
where
    F: FnMut(&ViewCommand),
{
    fn deliver(&mut self, command: &ViewCommand) {
        self(command);
    }
}
