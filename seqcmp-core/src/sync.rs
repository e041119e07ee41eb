//! The controller that owns the comparison state and keeps both panes in step.
//!
//! [`SyncController`] is the single entry point for a front end. It wraps the
//! [`ComparisonState`] and exposes every operation that mutates it: sequence import,
//! reversal and deletion, active-sequence selection, alignment refresh, selection
//! sync, scroll sync and the mode toggles.
//!
//! The alignment and the row colors are derived data. Any change that can shift
//! them (a new active sequence, a reversal, a deletion) recomputes both from
//! scratch; nothing is patched in place.

use crate::align::{align, AlignmentResult};
use crate::compare;
use crate::error::{CoreError, CoreResult};
use crate::exchange::ExchangeRecord;
use crate::sequence::SequenceId;
use crate::state::{ComparisonState, RowColorState, ScrollUpdate};
use crate::text_diff::SideBySide;
use crate::types::{DisplayMode, RowColor, SelectionEvent, SelectionOrigin, Side};

/// Owner of the comparison state. See the module docs.
#[derive(Debug, Default)]
pub struct SyncController {
    state: ComparisonState,
}

impl SyncController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view for rendering.
    pub fn state(&self) -> &ComparisonState {
        &self.state
    }

    // ---------------------------------------------------------------------------
    // Sequences
    // ---------------------------------------------------------------------------

    /// Imports a batch of exchanges atomically and returns the new id.
    pub fn add_sequence(&mut self, name: Option<String>, exchanges: Vec<ExchangeRecord>) -> SequenceId {
        self.state.store.add(name, exchanges)
    }

    pub fn rename_sequence(&mut self, id: SequenceId, name: String) -> CoreResult<()> {
        self.state.store.rename(id, name)
    }

    /// Reverses a sequence in place. An active side showing it returns to row 0
    /// and the alignment is recomputed.
    pub fn reverse_sequence(&mut self, id: SequenceId) -> CoreResult<()> {
        self.state.store.reverse(id)?;
        for side in [Side::Left, Side::Right] {
            if self.state.active(side) == Some(id) {
                self.reset_selection(side);
            }
        }
        self.refresh_alignment();
        Ok(())
    }

    /// Deletes a sequence; any side showing it is cleared.
    pub fn delete_sequence(&mut self, id: SequenceId) -> CoreResult<()> {
        self.state.store.remove(id)?;
        for side in [Side::Left, Side::Right] {
            if self.state.active(side) == Some(id) {
                self.state.active[side.index()] = None;
                self.state.selected[side.index()] = None;
            }
        }
        self.refresh_alignment();
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Active sequences and alignment
    // ---------------------------------------------------------------------------

    /// Shows `id` on `side`, selects its first row and refreshes the alignment.
    ///
    /// The initial selection is not propagated by selection sync.
    pub fn set_active_sequence(&mut self, side: Side, id: SequenceId) -> CoreResult<()> {
        if !self.state.store.contains(id) {
            return Err(CoreError::UnknownSequence(id));
        }
        self.state.active[side.index()] = Some(id);
        self.reset_selection(side);
        self.refresh_alignment();
        Ok(())
    }

    /// Empties both panes.
    pub fn clear_active(&mut self) {
        self.state.active = [None, None];
        self.state.selected = [None, None];
        self.refresh_alignment();
    }

    fn reset_selection(&mut self, side: Side) {
        let has_rows = self.state.active_sequence(side).is_some_and(|s| !s.is_empty());
        self.state.selected[side.index()] = has_rows.then_some(0);
    }

    /// Recomputes the URL alignment of the two active sequences and the row colors.
    ///
    /// Aligned rows whose response bodies are byte-identical become `Match`, other
    /// aligned rows `Mismatch`. Unaligned rows get no color. With fewer than two
    /// active sequences the alignment is empty.
    pub fn refresh_alignment(&mut self) {
        let (alignment, colors) = derive_alignment(&self.state);
        self.state.alignment = alignment;
        self.state.row_colors = colors;
    }

    /// Index on the other side aligned with `index` on `side`.
    pub fn resolve_correspondent(&self, side: Side, index: usize) -> Option<usize> {
        self.state.alignment.correspondent(side, index)
    }

    // ---------------------------------------------------------------------------
    // Selection sync
    // ---------------------------------------------------------------------------

    /// Records a row selection.
    ///
    /// When selection sync is on and the event came from the user, the aligned row
    /// on the other side is selected too and returned as a `Programmatic` event for
    /// the caller to apply to its widget. Programmatic events are recorded but never
    /// propagated, so applying the returned event cannot loop back. Indices past
    /// the end of the active sequence are ignored.
    pub fn select(&mut self, event: SelectionEvent) -> Option<SelectionEvent> {
        let len = self.state.active_sequence(event.side).map_or(0, |s| s.len());
        if event.index >= len {
            return None;
        }
        self.state.selected[event.side.index()] = Some(event.index);

        if event.origin == SelectionOrigin::Programmatic || !self.state.selection_sync {
            return None;
        }
        let target = self.resolve_correspondent(event.side, event.index)?;
        let induced = SelectionEvent::programmatic(event.side.other(), target);
        self.state.selected[induced.side.index()] = Some(target);
        tracing::debug!(from = ?event.side, index = event.index, to = target, "selection synced");
        Some(induced)
    }

    /// The two selected rows as `(left sequence, left row, right sequence, right row)`.
    pub fn selected_pair(&self) -> Option<(SequenceId, usize, SequenceId, usize)> {
        Some((
            self.state.active(Side::Left)?,
            self.state.selected(Side::Left)?,
            self.state.active(Side::Right)?,
            self.state.selected(Side::Right)?,
        ))
    }

    // ---------------------------------------------------------------------------
    // Comparison
    // ---------------------------------------------------------------------------

    /// Diffs two exchanges. See [`compare::compare`].
    pub fn compare(
        &self,
        left_sequence: SequenceId,
        left_index: usize,
        right_sequence: SequenceId,
        right_index: usize,
        mode: DisplayMode,
    ) -> CoreResult<SideBySide> {
        compare::compare(&self.state, left_sequence, left_index, right_sequence, right_index, mode)
    }

    /// Diffs the two selected exchanges in the current display mode, if both sides
    /// have a selection.
    pub fn compare_selected(&self) -> Option<CoreResult<SideBySide>> {
        let (ls, li, rs, ri) = self.selected_pair()?;
        Some(self.compare(ls, li, rs, ri, self.state.display_mode))
    }

    // ---------------------------------------------------------------------------
    // Toggles
    // ---------------------------------------------------------------------------

    /// Turns selection sync on or off. Turning it on refreshes the alignment.
    pub fn set_selection_sync(&mut self, enabled: bool) {
        self.state.selection_sync = enabled;
        if enabled {
            self.refresh_alignment();
        }
    }

    pub fn set_scroll_sync(&mut self, enabled: bool) {
        self.state.scroll.set_enabled(enabled);
    }

    /// Recomputes which scroll model each pane uses from the rendered text lengths.
    pub fn sync_scrolls(&mut self, left_len: usize, right_len: usize) -> ScrollUpdate {
        self.state.scroll.apply(left_len, right_len)
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state.display_mode = mode;
    }

    pub fn toggle_display_mode(&mut self) -> DisplayMode {
        self.state.display_mode = self.state.display_mode.toggled();
        self.state.display_mode
    }
}

fn derive_alignment(state: &ComparisonState) -> (AlignmentResult, [RowColorState; 2]) {
    let mut colors = [RowColorState::default(), RowColorState::default()];
    let (Some(left), Some(right)) =
        (state.active_sequence(Side::Left), state.active_sequence(Side::Right))
    else {
        return (AlignmentResult::default(), colors);
    };

    let alignment = align(&left.urls(), &right.urls());
    for entry in alignment.entries() {
        let same_body = left.exchanges()[entry.left].body() == right.exchanges()[entry.right].body();
        let color = if same_body { RowColor::Match } else { RowColor::Mismatch };
        colors[Side::Left.index()].set(entry.left, color);
        colors[Side::Right.index()].set(entry.right, color);
    }

    tracing::debug!(
        left = left.len(),
        right = right.len(),
        aligned = alignment.len(),
        matching = colors[0].iter().filter(|(_, c)| *c == RowColor::Match).count(),
        "alignment refreshed"
    );
    (alignment, colors)
}
