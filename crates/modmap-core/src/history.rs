//! Back/forward navigation over focused modules.
//!
//! # Branching
//!
//! Unlike a browser history, visiting a new module after going back does
//! **not** truncate the forward entries. Instead the old head (the last
//! entry) is duplicated onto the end of the path and the new module is
//! appended after it. Stepping back from the new module therefore lands on
//! the old head first, and every earlier entry stays reachable:
//!
//! ```
//! use modmap_core::NavigationHistory;
//!
//! let mut history = NavigationHistory::new();
//! history.visit("A");
//! history.visit("B");
//! history.back();
//! history.visit("C");
//! assert_eq!(history.path(), ["A", "B", "B", "C"]);
//! assert_eq!(history.cursor(), Some(3));
//! ```
//!
//! All operations are total: on an empty path they return `None`, and at
//! either end they leave the cursor where it is.

use tracing::trace;

/// Ordered path of focused module ids with a movable cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationHistory {
    path: Vec<String>,
    cursor: Option<usize>,
}

impl NavigationHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus `id`, appending it to the path.
    ///
    /// If the cursor was moved back, the old head is appended again first so
    /// it sits directly behind the new entry.
    pub fn visit(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.can_go_forward()
            && let Some(head) = self.path.last().cloned()
        {
            self.path.push(head);
        }
        trace!(%id, "history visit");
        self.path.push(id);
        self.cursor = Some(self.path.len() - 1);
    }

    /// Step the cursor back one entry (no-op at the start).
    ///
    /// Returns the id now under the cursor, or `None` if the history is empty.
    pub fn back(&mut self) -> Option<&str> {
        let cursor = self.cursor?;
        let moved = cursor.saturating_sub(1);
        self.cursor = Some(moved);
        self.current()
    }

    /// Step the cursor forward one entry (no-op at the end).
    ///
    /// Returns the id now under the cursor, or `None` if the history is empty.
    pub fn forward(&mut self) -> Option<&str> {
        let cursor = self.cursor?;
        let last = self.path.len().saturating_sub(1);
        self.cursor = Some((cursor + 1).min(last));
        self.current()
    }

    /// The id under the cursor, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|cursor| self.path.get(cursor))
            .map(String::as_str)
    }

    /// Cursor position; `None` when the history is empty.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Every visited entry, oldest first (may contain repeats).
    #[must_use]
    pub fn path(&self) -> &[String] {
        &self.path
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.path.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
