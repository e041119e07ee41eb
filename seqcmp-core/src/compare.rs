//! Comparison of two exchanges in the current display mode.

use std::borrow::Cow;

use crate::error::{CoreError, CoreResult};
use crate::exchange::ExchangeRecord;
use crate::sequence::SequenceId;
use crate::state::ComparisonState;
use crate::text_diff::{self, SideBySide};
use crate::types::DisplayMode;

/// Diffs row `left_index` of `left_sequence` against row `right_index` of
/// `right_sequence`.
///
/// # Errors
///
/// [`CoreError::UnknownSequence`] for an id not in the store and
/// [`CoreError::IndexOutOfRange`] for a row past the end of its sequence.
pub fn compare(
    state: &ComparisonState,
    left_sequence: SequenceId,
    left_index: usize,
    right_sequence: SequenceId,
    right_index: usize,
    mode: DisplayMode,
) -> CoreResult<SideBySide> {
    let left = lookup(state, left_sequence, left_index)?;
    let right = lookup(state, right_sequence, right_index)?;
    Ok(compare_exchanges(left, right, mode))
}

/// Diffs two exchanges directly. Pure: the same pair and mode always give the same
/// result.
pub fn compare_exchanges(left: &ExchangeRecord, right: &ExchangeRecord, mode: DisplayMode) -> SideBySide {
    let left_text = message_text(left, mode);
    let right_text = message_text(right, mode);
    let result = text_diff::diff(&left_text, &right_text);
    tracing::debug!(
        mode = mode.label(),
        left_chars = result.left.char_len(),
        right_chars = result.right.char_len(),
        left_spans = result.left.highlights.len(),
        right_spans = result.right.highlights.len(),
        "exchanges compared"
    );
    result
}

/// The text shown for `exchange` in `mode`. A missing response is empty.
pub fn message_text(exchange: &ExchangeRecord, mode: DisplayMode) -> Cow<'_, str> {
    match mode {
        DisplayMode::Request => String::from_utf8_lossy(&exchange.request_bytes),
        DisplayMode::Response => match &exchange.response_bytes {
            Some(bytes) => String::from_utf8_lossy(bytes),
            None => Cow::Borrowed(""),
        },
    }
}

fn lookup(state: &ComparisonState, id: SequenceId, index: usize) -> CoreResult<&ExchangeRecord> {
    let sequence = state.store().get(id).ok_or(CoreError::UnknownSequence(id))?;
    sequence.get(index).ok_or(CoreError::IndexOutOfRange {
        sequence: id,
        index,
        len: sequence.len(),
    })
}
