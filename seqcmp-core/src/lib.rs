//! Comparison core for recorded HTTP request sequences.
//!
//! Two runs of the same workflow are aligned by URL, their rows are colored by
//! whether the aligned response bodies agree, and any pair of exchanges can be
//! diffed side by side with character-accurate highlights.
//!
//! # Key Types
//!
//! - [`ExchangeRecord`] -- One request/response pair, built from raw HTTP/1.x bytes
//! - [`SequenceStore`] / [`Sequence`] -- Imported sequences with overview summaries
//! - [`align`] / [`AlignmentResult`] -- LCS alignment with a gap-sum tie-break
//! - [`diff`] / [`SideBySide`] / [`HighlightSpan`] -- Side-by-side text diff
//! - [`SyncController`] / [`ComparisonState`] -- Selection and scroll sync
//!
//! The crate does no I/O; hosts load captures and draw the state.

pub mod align;
pub mod compare;
pub mod error;
pub mod exchange;
pub mod sequence;
pub mod state;
pub mod sync;
pub mod text_diff;
pub mod types;

pub use align::{align, AlignmentEntry, AlignmentResult};
pub use compare::{compare_exchanges, message_text};
pub use error::{CoreError, CoreResult};
pub use exchange::{status_label, ExchangeRecord};
pub use sequence::{Sequence, SequenceId, SequenceStore, SequenceSummary, DEFAULT_SEQUENCE_NAME};
pub use state::{ComparisonState, RowColorState, ScrollBinding, ScrollUpdate};
pub use sync::SyncController;
pub use text_diff::{diff, EditLine, HighlightSpan, RenderedText, Segment, SideBySide, SpanCategory};
pub use types::{DisplayMode, RowColor, SelectionEvent, SelectionOrigin, Side};
