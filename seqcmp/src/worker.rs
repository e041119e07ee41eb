//! Background thread that runs comparisons off the UI thread.
//!
//! Requests arrive over a crossbeam channel and results go back as
//! `AppEvent::DiffResult`. Every request carries the generation it was issued
//! under; the UI drops any result whose generation is no longer current, so a
//! slow diff never overwrites a newer selection.

use crossbeam_channel::Receiver;
use seqcmp_core::{compare_exchanges, DisplayMode, ExchangeRecord, SideBySide};
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;

/// One comparison job. Exchanges are cloned in so the worker never touches
/// controller state.
#[derive(Debug, Clone)]
pub struct DiffRequest {
    pub generation: u64,
    pub left: ExchangeRecord,
    pub right: ExchangeRecord,
    pub mode: DisplayMode,
}

/// A finished comparison tagged with the generation of its request.
#[derive(Debug)]
pub struct DiffPayload {
    pub generation: u64,
    pub result: SideBySide,
}

/// Runs one request. Split out of the loop so it can be tested without threads.
pub fn run_request(request: &DiffRequest) -> DiffPayload {
    DiffPayload {
        generation: request.generation,
        result: compare_exchanges(&request.left, &request.right, request.mode),
    }
}

/// Entry point for the diff worker thread.
///
/// Loops until the request channel is closed. Queued requests that are already
/// superseded by a later one are skipped without diffing.
pub fn diff_worker_loop(rx: Receiver<DiffRequest>, event_tx: UnboundedSender<AppEvent>) {
    while let Ok(mut request) = rx.recv() {
        while let Ok(newer) = rx.try_recv() {
            tracing::debug!(skipped = request.generation, "superseded diff request dropped");
            request = newer;
        }
        let payload = run_request(&request);
        if event_tx.send(AppEvent::DiffResult(Box::new(payload))).is_err() {
            break;
        }
    }
    tracing::debug!("diff worker stopped");
}
