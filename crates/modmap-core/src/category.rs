//! Category styling table: top-level category → layout weight and colour.
//!
//! The weight places a category's band on the vertical axis (0.0 = top,
//! 1.0 = bottom). Categories missing from the table are not an error; they
//! fall back to [`CategoryStyle::default`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Vertical weight used for categories without an explicit entry.
pub const DEFAULT_WEIGHT: f64 = 0.5;

/// Style for one top-level category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    /// Vertical band position in `[0.0, 1.0]`.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Optional CSS-style colour (`#rrggbb`); renderers pick one if absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Default for CategoryStyle {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            color: None,
        }
    }
}

const fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// Built-in weights for the mathlib top-level namespaces.
const BUILTIN_WEIGHTS: &[(&str, f64)] = &[
    ("Algebra", 0.4),
    ("Data", 0.5),
    ("RingTheory", 0.3),
    ("Order", 0.5),
    ("LinearAlgebra", 0.55),
    ("Init", 0.5),
    ("Control", 0.0),
    ("Logic", 0.6),
    ("Mathport", 1.0),
    ("NumberTheory", 0.5),
    ("GroupTheory", 0.2),
    ("SetTheory", 0.6),
    ("AlgebraicGeometry", 0.6),
    ("CategoryTheory", 0.7),
    ("Geometry", 0.65),
    ("Topology", 0.85),
    ("AlgebraicTopology", 0.8),
    ("Analysis", 0.75),
    ("MeasureTheory", 0.9),
    ("Combinatorics", 0.1),
    ("Computability", 0.65),
    ("Condensed", 0.8),
    ("Deprecated", 1.0),
    ("Dynamics", 1.0),
    ("FieldTheory", 0.2),
    ("InformationTheory", 0.1),
    ("ModelTheory", 0.35),
    ("Probability", 1.0),
    ("RepresentationTheory", 0.35),
];

/// Lookup table from category name to [`CategoryStyle`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTable {
    styles: HashMap<String, CategoryStyle>,
}

impl CategoryTable {
    /// An empty table: every category gets the default style.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table for mathlib-style data.
    #[must_use]
    pub fn builtin() -> Self {
        let styles = BUILTIN_WEIGHTS
            .iter()
            .map(|&(name, weight)| {
                (
                    name.to_string(),
                    CategoryStyle {
                        weight,
                        color: None,
                    },
                )
            })
            .collect();
        Self { styles }
    }

    /// Overlay `overrides` on top of this table (override wins per category).
    #[must_use]
    pub fn with_overrides(mut self, overrides: &HashMap<String, CategoryStyle>) -> Self {
        for (name, style) in overrides {
            self.styles.insert(name.clone(), style.clone());
        }
        self
    }

    /// Explicit style for `category`, if the table has one.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryStyle> {
        self.styles.get(category)
    }

    /// Style for `category`, falling back to the default style.
    #[must_use]
    pub fn style_or_default(&self, category: &str) -> CategoryStyle {
        self.get(category).cloned().unwrap_or_default()
    }

    /// Vertical weight for `category`, falling back to [`DEFAULT_WEIGHT`].
    #[must_use]
    pub fn weight(&self, category: &str) -> f64 {
        self.get(category).map_or(DEFAULT_WEIGHT, |style| style.weight)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
