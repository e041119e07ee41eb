//! The comparison state owned by a [`crate::sync::SyncController`].
//!
//! Everything the front end reads to draw a frame lives here: the sequences, which
//! two are active, the current row selections, the alignment and the row colors
//! derived from it, and the mode toggles. Fields are only mutated through the
//! controller; callers get read-only accessors.

use std::collections::BTreeMap;

use crate::align::AlignmentResult;
use crate::exchange::ExchangeRecord;
use crate::sequence::{Sequence, SequenceId, SequenceStore};
use crate::types::{DisplayMode, RowColor, Side};

/// Sparse row → color map for one pane. Rows without an entry use the default
/// color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowColorState {
    rows: BTreeMap<usize, RowColor>,
}

impl RowColorState {
    pub fn get(&self, row: usize) -> Option<RowColor> {
        self.rows.get(&row).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, RowColor)> + '_ {
        self.rows.iter().map(|(row, color)| (*row, *color))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn set(&mut self, row: usize, color: RowColor) {
        self.rows.insert(row, color);
    }
}

/// Which scroll model each pane is driven by.
///
/// Independent panes use their own model. With scroll sync on, both panes point at
/// the model of the pane showing the longer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBinding {
    pub left: Side,
    pub right: Side,
}

impl ScrollBinding {
    pub const INDEPENDENT: Self = Self { left: Side::Left, right: Side::Right };

    /// Both panes driven by `owner`'s model.
    pub fn shared(owner: Side) -> Self {
        Self { left: owner, right: owner }
    }

    /// The model `side` currently scrolls with.
    pub fn model_for(&self, side: Side) -> Side {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

impl Default for ScrollBinding {
    fn default() -> Self {
        Self::INDEPENDENT
    }
}

/// Outcome of recomputing the scroll binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub binding: ScrollBinding,
    /// `true` when the binding was (re)applied and the panes should return to the
    /// top; `false` when nothing changed.
    pub rebound: bool,
}

#[derive(Debug, Default)]
pub(crate) struct ScrollSync {
    pub(crate) enabled: bool,
    /// Set when sync is switched off; cleared by the single restore that follows.
    pub(crate) needs_restore: bool,
    pub(crate) binding: ScrollBinding,
}

impl ScrollSync {
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.needs_restore = true;
        }
        self.enabled = enabled;
    }

    pub(crate) fn apply(&mut self, left_len: usize, right_len: usize) -> ScrollUpdate {
        if self.enabled {
            self.binding = if left_len > 0 && right_len > 0 {
                if left_len > right_len {
                    ScrollBinding::shared(Side::Left)
                } else {
                    ScrollBinding::shared(Side::Right)
                }
            } else {
                ScrollBinding::INDEPENDENT
            };
            return ScrollUpdate { binding: self.binding, rebound: true };
        }
        if self.needs_restore {
            self.needs_restore = false;
            self.binding = ScrollBinding::INDEPENDENT;
            return ScrollUpdate { binding: self.binding, rebound: true };
        }
        ScrollUpdate { binding: self.binding, rebound: false }
    }
}

/// All comparison state, owned by exactly one controller.
#[derive(Debug, Default)]
pub struct ComparisonState {
    pub(crate) store: SequenceStore,
    pub(crate) active: [Option<SequenceId>; 2],
    pub(crate) selected: [Option<usize>; 2],
    pub(crate) alignment: AlignmentResult,
    pub(crate) row_colors: [RowColorState; 2],
    pub(crate) display_mode: DisplayMode,
    pub(crate) selection_sync: bool,
    pub(crate) scroll: ScrollSync,
}

impl ComparisonState {
    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    pub fn active(&self, side: Side) -> Option<SequenceId> {
        self.active[side.index()]
    }

    /// The sequence shown on `side`, if one is active.
    pub fn active_sequence(&self, side: Side) -> Option<&Sequence> {
        self.active(side).and_then(|id| self.store.get(id))
    }

    pub fn selected(&self, side: Side) -> Option<usize> {
        self.selected[side.index()]
    }

    /// The exchange currently selected on `side`.
    pub fn selected_exchange(&self, side: Side) -> Option<&ExchangeRecord> {
        let index = self.selected(side)?;
        self.active_sequence(side)?.get(index)
    }

    pub fn alignment(&self) -> &AlignmentResult {
        &self.alignment
    }

    pub fn row_colors(&self, side: Side) -> &RowColorState {
        &self.row_colors[side.index()]
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn selection_sync(&self) -> bool {
        self.selection_sync
    }

    pub fn scroll_sync(&self) -> bool {
        self.scroll.enabled
    }

    pub fn scroll_binding(&self) -> ScrollBinding {
        self.scroll.binding
    }
}
