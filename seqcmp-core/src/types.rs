//! Small shared value types used across the comparison core.
//!
//! Everything here is `Copy` so it can be passed freely between the controller,
//! the orchestrator and the front end without ownership bookkeeping.

use serde::{Deserialize, Serialize};

/// One of the two compared panes.
///
/// `Left` shows the first active sequence, `Right` the second. Alignment entries
/// are always expressed as `(left index, right index)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the opposite pane.
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Array slot used by per-side state (`[left, right]`).
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Which half of an exchange is fed to the differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Raw request bytes (default).
    #[default]
    Request,
    /// Raw response bytes; an exchange without a response compares as empty text.
    Response,
}

impl DisplayMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Request => DisplayMode::Response,
            DisplayMode::Response => DisplayMode::Request,
        }
    }

    /// Short label for status bars.
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Request => "Request",
            DisplayMode::Response => "Response",
        }
    }
}

/// Where a row-selection change came from.
///
/// Only `User` selections are propagated by selection sync. A selection produced
/// by the sync itself is `Programmatic` and is never fed back into the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    User,
    Programmatic,
}

/// A row selection on one pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEvent {
    pub side: Side,
    pub index: usize,
    pub origin: SelectionOrigin,
}

impl SelectionEvent {
    /// A selection made directly by the user.
    pub fn user(side: Side, index: usize) -> Self {
        Self { side, index, origin: SelectionOrigin::User }
    }

    /// A selection induced by selection sync.
    pub fn programmatic(side: Side, index: usize) -> Self {
        Self { side, index, origin: SelectionOrigin::Programmatic }
    }
}

/// Display category for an aligned exchange row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColor {
    /// Aligned and both response bodies are byte-identical.
    Match,
    /// Aligned but the response bodies differ.
    Mismatch,
}
