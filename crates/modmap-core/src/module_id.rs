//! Helpers for dotted hierarchical module ids (`Algebra.Group.Basic`).

/// Separator between path segments of a module id.
pub const SEGMENT_SEPARATOR: char = '.';

/// Top-level category of a module: its first dot-segment.
///
/// An id without dots is its own category. The empty id has the empty
/// category.
///
/// ```
/// use modmap_core::module_id::category_of;
///
/// assert_eq!(category_of("Algebra.Group.Basic"), "Algebra");
/// assert_eq!(category_of("Init"), "Init");
/// ```
#[must_use]
pub fn category_of(id: &str) -> &str {
    id.split(SEGMENT_SEPARATOR).next().unwrap_or(id)
}

/// Iterate the dot-separated segments of a module id.
pub fn segments(id: &str) -> impl Iterator<Item = &str> {
    id.split(SEGMENT_SEPARATOR)
}

/// Return `true` if the id's top-level segment is one of `roots`.
#[must_use]
pub fn in_namespaces(id: &str, roots: &[String]) -> bool {
    let category = category_of(id);
    roots.iter().any(|root| root == category)
}

/// Distinct categories of `ids` in first-seen order.
///
/// The position of a category in this list is the category index handed
/// to renderers.
#[must_use]
pub fn categories_in_order<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for id in ids {
        let category = category_of(id);
        if seen.insert(category) {
            out.push(category.to_string());
        }
    }
    out
}
