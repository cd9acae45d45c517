//! Renderer-facing node and link records.
//!
//! # Placement
//!
//! - `x = rank * width`: dependencies sit left of their dependents.
//! - `y = weight(category) * height + jitter * U[0, 1)`: each top-level
//!   category gets its own horizontal band, with a little noise so nodes of
//!   the same rank don't stack exactly.
//!
//! The noise comes from a [`StdRng`] seeded with `layout.seed`, so the same
//! data and config always give the same picture.

use modmap_core::config::LayoutConfig;
use modmap_core::module_id::{categories_in_order, category_of};
use modmap_core::{CategoryTable, TranslationTable};
use modmap_graph::{ModuleGraph, RankTable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// One positioned node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    /// Display label.
    pub name: String,
    pub symbol_size: f64,
    /// Size metric (`in_degree + out_degree`).
    pub value: usize,
    pub x: f64,
    pub y: f64,
    /// Index into [`GraphExport::categories`].
    pub category: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Everything an external renderer needs to draw the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphExport {
    pub categories: Vec<ExportCategory>,
    pub nodes: Vec<RenderNode>,
    pub links: Vec<RenderLink>,
}

/// Lay out every node of `graph`, in first-seen order.
#[allow(clippy::cast_precision_loss)]
pub fn layout_graph(
    graph: &ModuleGraph,
    ranks: &RankTable,
    styles: &CategoryTable,
    labels: &TranslationTable,
    config: &LayoutConfig,
) -> GraphExport {
    let category_names = categories_in_order(graph.nodes());
    let mut rng = StdRng::seed_from_u64(config.seed);

    let nodes = graph
        .nodes()
        .map(|id| {
            let category = category_of(id);
            let value = graph.degrees().size_metric(id);
            let rank = ranks.rank(id).unwrap_or(0.0);
            let noise: f64 = rng.gen_range(0.0..1.0);
            RenderNode {
                id: id.to_string(),
                name: labels.label_for(id),
                symbol_size: value as f64 * config.symbol_scale,
                value,
                x: rank * config.width,
                y: styles.weight(category).mul_add(config.height, config.jitter * noise),
                category: category_names
                    .iter()
                    .position(|name| name == category)
                    .unwrap_or_default(),
            }
        })
        .collect();

    let links = graph
        .edges()
        .map(|(source, target)| RenderLink {
            source: source.to_string(),
            target: target.to_string(),
        })
        .collect();

    let categories = category_names
        .into_iter()
        .map(|name| {
            let color = styles.style_or_default(&name).color;
            ExportCategory { name, color }
        })
        .collect();

    GraphExport {
        categories,
        nodes,
        links,
    }
}
