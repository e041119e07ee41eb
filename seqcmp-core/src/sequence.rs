//! Named, ordered collections of exchanges and the in-memory store that owns them.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::exchange::ExchangeRecord;

/// Stable identifier of an imported sequence. Allocated from 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceId(pub u64);

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cached overview row for a sequence.
///
/// First/last fields describe the current order and are swapped on reversal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SequenceSummary {
    pub request_count: usize,
    pub first_url: Option<String>,
    pub first_status: Option<u16>,
    pub last_url: Option<String>,
    pub last_status: Option<u16>,
    /// Sum of request and response lengths over all exchanges.
    pub total_length: usize,
}

impl SequenceSummary {
    fn from_exchanges(exchanges: &[ExchangeRecord]) -> Self {
        let first = exchanges.first();
        let last = exchanges.last();
        Self {
            request_count: exchanges.len(),
            first_url: first.map(|e| e.url.clone()),
            first_status: first.and_then(|e| e.status_code),
            last_url: last.map(|e| e.url.clone()),
            last_status: last.and_then(|e| e.status_code),
            total_length: exchanges.iter().map(ExchangeRecord::total_len).sum(),
        }
    }

    fn swap_ends(&mut self) {
        std::mem::swap(&mut self.first_url, &mut self.last_url);
        std::mem::swap(&mut self.first_status, &mut self.last_status);
    }
}

/// One recorded run of a workflow.
#[derive(Debug, Clone)]
pub struct Sequence {
    id: SequenceId,
    name: String,
    exchanges: Vec<ExchangeRecord>,
    summary: SequenceSummary,
}

impl Sequence {
    pub fn id(&self) -> SequenceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exchanges(&self) -> &[ExchangeRecord] {
        &self.exchanges
    }

    pub fn summary(&self) -> &SequenceSummary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ExchangeRecord> {
        self.exchanges.get(index)
    }

    /// The alignment keys of this sequence, in order.
    pub fn urls(&self) -> Vec<&str> {
        self.exchanges.iter().map(|e| e.url.as_str()).collect()
    }
}

/// Owner of every imported sequence, iterated in id order.
#[derive(Debug, Default)]
pub struct SequenceStore {
    sequences: BTreeMap<SequenceId, Sequence>,
    next_id: u64,
}

pub const DEFAULT_SEQUENCE_NAME: &str = "New Sequence";

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imports a batch of exchanges as one new sequence.
    pub fn add(&mut self, name: Option<String>, exchanges: Vec<ExchangeRecord>) -> SequenceId {
        self.next_id += 1;
        let id = SequenceId(self.next_id);
        let summary = SequenceSummary::from_exchanges(&exchanges);
        let name = name.unwrap_or_else(|| DEFAULT_SEQUENCE_NAME.to_owned());
        tracing::info!(%id, name = %name, count = exchanges.len(), "sequence added");
        self.sequences.insert(id, Sequence { id, name, exchanges, summary });
        id
    }

    /// Reverses a sequence in place, swapping its first/last summary fields.
    pub fn reverse(&mut self, id: SequenceId) -> CoreResult<()> {
        let seq = self.sequences.get_mut(&id).ok_or(CoreError::UnknownSequence(id))?;
        seq.exchanges.reverse();
        seq.summary.swap_ends();
        tracing::info!(%id, "sequence reversed");
        Ok(())
    }

    pub fn rename(&mut self, id: SequenceId, name: String) -> CoreResult<()> {
        let seq = self.sequences.get_mut(&id).ok_or(CoreError::UnknownSequence(id))?;
        seq.name = name;
        Ok(())
    }

    pub fn remove(&mut self, id: SequenceId) -> CoreResult<Sequence> {
        let seq = self.sequences.remove(&id).ok_or(CoreError::UnknownSequence(id))?;
        tracing::info!(%id, "sequence deleted");
        Ok(seq)
    }

    pub fn get(&self, id: SequenceId) -> Option<&Sequence> {
        self.sequences.get(&id)
    }

    pub fn contains(&self, id: SequenceId) -> bool {
        self.sequences.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.values()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(pos: usize, path: &str, status: Option<u16>) -> ExchangeRecord {
        let request = format!("GET {path} HTTP/1.1\r\nHost: app.test\r\n\r\n").into_bytes();
        let response = status.map(|s| format!("HTTP/1.1 {s} X\r\n\r\nbody").into_bytes());
        ExchangeRecord::from_raw(pos, "http", request, response)
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = SequenceStore::new();
        let a = store.add(None, vec![exchange(0, "/a", Some(200))]);
        store.remove(a).unwrap();
        let b = store.add(None, Vec::new());
        assert_ne!(a, b);
        assert_eq!(store.get(b).unwrap().name(), DEFAULT_SEQUENCE_NAME);
    }

    #[test]
    fn summary_tracks_ends_and_length() {
        let mut store = SequenceStore::new();
        let ex = vec![exchange(0, "/login", Some(302)), exchange(1, "/home", None)];
        let expected_len: usize = ex.iter().map(ExchangeRecord::total_len).sum();
        let id = store.add(Some("run".into()), ex);

        let summary = store.get(id).unwrap().summary().clone();
        assert_eq!(summary.request_count, 2);
        assert_eq!(summary.first_url.as_deref(), Some("http://app.test/login"));
        assert_eq!(summary.first_status, Some(302));
        assert_eq!(summary.last_url.as_deref(), Some("http://app.test/home"));
        assert_eq!(summary.last_status, None);
        assert_eq!(summary.total_length, expected_len);
    }

    #[test]
    fn empty_sequence_has_empty_summary() {
        let mut store = SequenceStore::new();
        let id = store.add(None, Vec::new());
        let seq = store.get(id).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.summary(), &SequenceSummary::default());
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut store = SequenceStore::new();
        assert!(matches!(store.reverse(SequenceId(9)), Err(CoreError::UnknownSequence(_))));
        assert!(store.remove(SequenceId(9)).is_err());
        assert!(store.rename(SequenceId(9), "x".into()).is_err());
    }
}
