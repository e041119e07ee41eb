//! Error types for the comparison core.

use crate::sequence::SequenceId;

/// Errors reported by store and comparison operations.
///
/// The algorithms themselves are total; these only arise when a caller names a
/// sequence or row that does not exist.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    /// No sequence with this id is in the store.
    #[error("unknown sequence id {0}")]
    UnknownSequence(SequenceId),

    /// A row index past the end of a sequence was passed to `compare`.
    #[error("exchange index {index} out of range for sequence {sequence} ({len} exchanges)")]
    IndexOutOfRange {
        sequence: SequenceId,
        index: usize,
        len: usize,
    },
}

/// Convenience alias for core results.
pub type CoreResult<T> = Result<T, CoreError>;
