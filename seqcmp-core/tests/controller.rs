//! Controller behavior across sequence import, alignment, selection and scroll sync.

use seqcmp_core::{
    CoreError, DisplayMode, ExchangeRecord, RowColor, ScrollBinding, SelectionEvent, SequenceId,
    Side, SpanCategory, SyncController,
};

fn exchange(pos: usize, path: &str, body: Option<&str>) -> ExchangeRecord {
    let request = format!("GET {path} HTTP/1.1\r\nHost: shop.test\r\n\r\n").into_bytes();
    let response = body.map(|b| format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{b}", b.len()).into_bytes());
    ExchangeRecord::from_raw(pos, "https", request, response)
}

fn sequence(steps: &[(&str, Option<&str>)]) -> Vec<ExchangeRecord> {
    steps
        .iter()
        .enumerate()
        .map(|(pos, (path, body))| exchange(pos, path, *body))
        .collect()
}

/// Left: login, home, cart. Right: login, cart with a different cart body.
fn two_runs() -> (SyncController, SequenceId, SequenceId) {
    let mut ctl = SyncController::new();
    let left = ctl.add_sequence(
        Some("first run".into()),
        sequence(&[("/login", Some("ok")), ("/home", Some("welcome")), ("/cart", Some("3 items"))]),
    );
    let right = ctl.add_sequence(
        Some("second run".into()),
        sequence(&[("/login", Some("ok")), ("/cart", Some("0 items"))]),
    );
    ctl.set_active_sequence(Side::Left, left).unwrap();
    ctl.set_active_sequence(Side::Right, right).unwrap();
    (ctl, left, right)
}

#[test]
fn alignment_skips_missing_step() {
    let (ctl, _, _) = two_runs();
    let pairs: Vec<(usize, usize)> = ctl
        .state()
        .alignment()
        .entries()
        .iter()
        .map(|e| (e.left, e.right))
        .collect();
    assert_eq!(pairs, vec![(0, 0), (2, 1)]);
}

#[test]
fn row_colors_follow_response_bodies() {
    let (ctl, _, _) = two_runs();
    let left = ctl.state().row_colors(Side::Left);
    assert_eq!(left.get(0), Some(RowColor::Match));
    assert_eq!(left.get(1), None);
    assert_eq!(left.get(2), Some(RowColor::Mismatch));

    let right = ctl.state().row_colors(Side::Right);
    assert_eq!(right.get(0), Some(RowColor::Match));
    assert_eq!(right.get(1), Some(RowColor::Mismatch));
    assert_eq!(right.len(), 2);
}

#[test]
fn missing_responses_compare_equal() {
    let mut ctl = SyncController::new();
    let a = ctl.add_sequence(None, sequence(&[("/ping", None)]));
    let b = ctl.add_sequence(None, sequence(&[("/ping", None)]));
    ctl.set_active_sequence(Side::Left, a).unwrap();
    ctl.set_active_sequence(Side::Right, b).unwrap();
    assert_eq!(ctl.state().row_colors(Side::Left).get(0), Some(RowColor::Match));
}

#[test]
fn activation_selects_first_row() {
    let (ctl, left, right) = two_runs();
    assert_eq!(ctl.state().selected(Side::Left), Some(0));
    assert_eq!(ctl.state().selected(Side::Right), Some(0));
    assert_eq!(ctl.selected_pair(), Some((left, 0, right, 0)));
}

#[test]
fn unknown_sequence_cannot_be_activated() {
    let mut ctl = SyncController::new();
    assert_eq!(
        ctl.set_active_sequence(Side::Left, SequenceId(7)),
        Err(CoreError::UnknownSequence(SequenceId(7)))
    );
    assert_eq!(ctl.state().active(Side::Left), None);
}

#[test]
fn selection_sync_propagates_user_selection_once() {
    let (mut ctl, _, _) = two_runs();
    ctl.set_selection_sync(true);

    let induced = ctl.select(SelectionEvent::user(Side::Left, 2));
    assert_eq!(induced, Some(SelectionEvent::programmatic(Side::Right, 1)));
    assert_eq!(ctl.state().selected(Side::Right), Some(1));

    // Feeding the induced event back, as a widget callback would, stops there.
    assert_eq!(ctl.select(induced.unwrap()), None);
    assert_eq!(ctl.state().selected(Side::Left), Some(2));
}

#[test]
fn selection_sync_leaves_unaligned_rows_alone() {
    let (mut ctl, _, _) = two_runs();
    ctl.set_selection_sync(true);
    assert_eq!(ctl.select(SelectionEvent::user(Side::Left, 1)), None);
    assert_eq!(ctl.state().selected(Side::Left), Some(1));
    assert_eq!(ctl.state().selected(Side::Right), Some(0));
}

#[test]
fn selection_without_sync_stays_local() {
    let (mut ctl, _, _) = two_runs();
    assert_eq!(ctl.select(SelectionEvent::user(Side::Right, 1)), None);
    assert_eq!(ctl.state().selected(Side::Left), Some(0));
}

#[test]
fn out_of_range_selection_is_ignored() {
    let (mut ctl, _, _) = two_runs();
    ctl.set_selection_sync(true);
    assert_eq!(ctl.select(SelectionEvent::user(Side::Right, 5)), None);
    assert_eq!(ctl.state().selected(Side::Right), Some(0));
    assert_eq!(ctl.resolve_correspondent(Side::Right, 5), None);
}

#[test]
fn reverse_twice_restores_order_and_summary() {
    let (mut ctl, left, _) = two_runs();
    let before = ctl.state().store().get(left).unwrap().clone();

    ctl.reverse_sequence(left).unwrap();
    let reversed = ctl.state().store().get(left).unwrap();
    assert_eq!(reversed.urls().first().copied(), Some("https://shop.test/cart"));
    assert_eq!(reversed.summary().first_url, before.summary().last_url);
    assert_eq!(reversed.summary().last_url, before.summary().first_url);

    ctl.reverse_sequence(left).unwrap();
    let restored = ctl.state().store().get(left).unwrap();
    assert_eq!(restored.exchanges(), before.exchanges());
    assert_eq!(restored.summary(), before.summary());
}

#[test]
fn reversing_active_sequence_realigns() {
    let (mut ctl, left, _) = two_runs();
    ctl.select(SelectionEvent::user(Side::Left, 2));
    ctl.reverse_sequence(left).unwrap();

    // Left is now cart, home, login; only one URL can be matched in order.
    assert_eq!(ctl.state().alignment().len(), 1);
    assert_eq!(ctl.state().selected(Side::Left), Some(0));
}

#[test]
fn deleting_active_sequence_clears_its_side() {
    let (mut ctl, left, right) = two_runs();
    ctl.delete_sequence(left).unwrap();

    assert_eq!(ctl.state().active(Side::Left), None);
    assert_eq!(ctl.state().selected(Side::Left), None);
    assert_eq!(ctl.state().active(Side::Right), Some(right));
    assert!(ctl.state().alignment().is_empty());
    assert!(ctl.state().row_colors(Side::Right).is_empty());
    assert!(ctl.compare_selected().is_none());
}

#[test]
fn clear_active_empties_both_panes() {
    let (mut ctl, _, _) = two_runs();
    ctl.clear_active();
    assert_eq!(ctl.state().active(Side::Left), None);
    assert_eq!(ctl.state().active(Side::Right), None);
    assert!(ctl.state().alignment().is_empty());
    assert_eq!(ctl.state().store().len(), 2);
}

#[test]
fn compare_selected_uses_display_mode() {
    let (mut ctl, _, _) = two_runs();
    ctl.select(SelectionEvent::user(Side::Left, 2));
    ctl.select(SelectionEvent::user(Side::Right, 1));

    let request = ctl.compare_selected().unwrap().unwrap();
    assert!(request.left.text.starts_with("GET /cart"));
    assert_eq!(request.left.text, request.right.text);
    assert!(request.left.highlights.is_empty());

    assert_eq!(ctl.toggle_display_mode(), DisplayMode::Response);
    let response = ctl.compare_selected().unwrap().unwrap();
    assert!(response.left.text.ends_with("3 items"));
    assert!(response.right.text.ends_with("0 items"));
    assert!(response
        .right
        .highlights
        .iter()
        .all(|span| span.category == SpanCategory::Modified));
}

#[test]
fn scroll_sync_binds_shorter_pane_to_longer() {
    let mut ctl = SyncController::new();
    ctl.set_scroll_sync(true);
    let update = ctl.sync_scrolls(12, 80);
    assert!(update.rebound);
    assert_eq!(update.binding, ScrollBinding::shared(Side::Right));
    assert_eq!(ctl.state().scroll_binding().model_for(Side::Left), Side::Right);

    ctl.set_scroll_sync(false);
    assert_eq!(ctl.sync_scrolls(12, 80).binding, ScrollBinding::INDEPENDENT);
    assert!(!ctl.sync_scrolls(12, 80).rebound);
}

#[test]
fn rename_and_default_name() {
    let mut ctl = SyncController::new();
    let id = ctl.add_sequence(None, Vec::new());
    assert_eq!(ctl.state().store().get(id).unwrap().name(), "New Sequence");
    ctl.rename_sequence(id, "checkout".into()).unwrap();
    assert_eq!(ctl.state().store().get(id).unwrap().name(), "checkout");
}
