//! The seam between the graph engine and a view.
//!
//! [`ExploreAdapter`] owns everything built from one data load (graph, ranks,
//! laid-out nodes, search index) plus the navigation history. A view feeds it
//! [`ViewEvent`]s; it answers by delivering [`ViewCommand`]s to every
//! subscribed [`CommandSink`], in subscription order.

use std::collections::HashMap;

use modmap_core::config::ProjectConfig;
use modmap_core::module_id::category_of;
use modmap_core::{Adjacency, CategoryTable, NavigationHistory, TranslationTable};
use modmap_graph::{ModuleGraph, RankTable};
use modmap_search::{IndexEntry, SearchHit, SearchIndex};
use tracing::{debug, info, instrument, warn};

use super::events::{CommandSink, NodeInfo, ViewCommand, ViewEvent};
use super::layout::{GraphExport, RenderNode, layout_graph};

pub struct ExploreAdapter {
    graph: ModuleGraph,
    ranks: RankTable,
    export: GraphExport,
    /// Module id → index into `export.nodes`.
    positions: HashMap<String, usize>,
    index: SearchIndex,
    search_limit: usize,
    history: NavigationHistory,
    sinks: Vec<Box<dyn CommandSink>>,
}

impl ExploreAdapter {
    /// Build graph, ranks, layout and search index for `adjacency`, with
    /// untranslated labels.
    #[instrument(skip_all, fields(keys = adjacency.len()))]
    pub fn new(adjacency: &Adjacency, config: &ProjectConfig) -> Self {
        let graph = ModuleGraph::from_adjacency(adjacency);
        let ranks = RankTable::from_adjacency(adjacency);
        let styles: CategoryTable = config.category_table();
        let export = layout_graph(
            &graph,
            &ranks,
            &styles,
            &TranslationTable::default(),
            &config.layout,
        );
        let positions = export
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), i))
            .collect();
        let index = SearchIndex::build(&index_entries(&export.nodes));

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            hash = %graph.content_hash,
            "explorer ready"
        );

        Self {
            graph,
            ranks,
            export,
            positions,
            index,
            search_limit: config.search.limit,
            history: NavigationHistory::new(),
            sinks: Vec::new(),
        }
    }

    /// Register an observer for every command emitted from now on.
    pub fn subscribe(&mut self, sink: Box<dyn CommandSink>) {
        self.sinks.push(sink);
    }

    /// Process one view event.
    pub fn handle(&mut self, event: ViewEvent) {
        debug!(?event, "view event");
        match event {
            ViewEvent::NodeClicked(id) => {
                if self.positions.contains_key(&id) {
                    self.history.visit(id.as_str());
                    self.focus(&id);
                } else {
                    warn!(%id, "click on unknown module ignored");
                }
            }
            ViewEvent::CanvasClicked => self.emit(&ViewCommand::ClearPanel),
            ViewEvent::SearchInput(query) => {
                let hits = self.search(&query);
                self.emit(&ViewCommand::SearchResults { query, hits });
            }
            ViewEvent::HistoryBack => {
                if let Some(id) = self.history.back().map(str::to_string) {
                    self.focus(&id);
                }
            }
            ViewEvent::HistoryForward => {
                if let Some(id) = self.history.forward().map(str::to_string) {
                    self.focus(&id);
                }
            }
        }
    }

    /// Replace every label with its translation of the raw id, then rebuild
    /// the search index.
    #[instrument(skip_all, fields(entries = table.len()))]
    pub fn apply_translation(&mut self, table: &TranslationTable) {
        for node in &mut self.export.nodes {
            node.name = table.label_for(&node.id);
        }
        self.index = SearchIndex::build(&index_entries(&self.export.nodes));
        debug!("labels replaced and search index rebuilt");
    }

    /// Ranked search, capped at the configured limit.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.search_with_limit(query, self.search_limit)
    }

    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.index.query_limited(query, limit)
    }

    /// Panel payload for `id`, or `None` for unknown modules.
    pub fn node_info(&self, id: &str) -> Option<NodeInfo> {
        let node = self.node(id)?;
        let degree = self.graph.degree(id);
        Some(NodeInfo {
            id: node.id.clone(),
            label: node.name.clone(),
            category: category_of(id).to_string(),
            in_degree: degree.in_degree,
            out_degree: degree.out_degree,
            rank: self.ranks.rank(id).unwrap_or(0.0),
            dependencies: owned_ids(self.graph.dependencies_of(id)),
            dependents: owned_ids(self.graph.dependents_of(id)),
        })
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.positions.get(id).map(|&i| &self.export.nodes[i])
    }

    pub const fn export(&self) -> &GraphExport {
        &self.export
    }

    pub const fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    pub const fn ranks(&self) -> &RankTable {
        &self.ranks
    }

    pub const fn history(&self) -> &NavigationHistory {
        &self.history
    }

    fn focus(&mut self, id: &str) {
        let Some(node) = self.node(id) else {
            return;
        };
        let focus = ViewCommand::FocusNode {
            id: node.id.clone(),
            x: node.x,
            y: node.y,
        };
        self.emit(&focus);
        if let Some(info) = self.node_info(id) {
            self.emit(&ViewCommand::RenderPanel(info));
        }
    }

    fn emit(&mut self, command: &ViewCommand) {
        for sink in &mut self.sinks {
            sink.deliver(command);
        }
    }
}

fn index_entries(nodes: &[RenderNode]) -> Vec<IndexEntry> {
    nodes
        .iter()
        .map(|node| IndexEntry::new(node.id.clone(), node.name.clone()))
        .collect()
}

fn owned_ids(ids: Vec<&str>) -> Vec<String> {
    ids.into_iter().map(str::to_string).collect()
}
