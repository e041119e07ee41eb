//! Central application state for seqcmp.
//!
//! This module owns all mutable UI state: the mode, which panel has focus, table
//! selections, the rendered comparison panes, scroll models and viewport heights.
//! Comparison state itself lives in the [`SyncController`]; `AppState` mirrors its
//! selections into the table widgets and forwards every user action to it. No
//! ratatui rendering logic lives here.

use crossbeam_channel::Sender;
use ratatui::widgets::TableState;
use seqcmp_core::{RenderedText, SelectionEvent, SequenceId, Side, SpanCategory, SyncController};

use crate::worker::{self, DiffPayload, DiffRequest};

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
}

/// Which panel currently has keyboard focus.
///
/// Tab cycles Sequences → LeftList → RightList → LeftPane → RightPane.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Sequence overview table (top).
    #[default]
    Sequences,
    LeftList,
    RightList,
    LeftPane,
    RightPane,
}

impl PanelFocus {
    pub fn next(self) -> Self {
        match self {
            PanelFocus::Sequences => PanelFocus::LeftList,
            PanelFocus::LeftList => PanelFocus::RightList,
            PanelFocus::RightList => PanelFocus::LeftPane,
            PanelFocus::LeftPane => PanelFocus::RightPane,
            PanelFocus::RightPane => PanelFocus::Sequences,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PanelFocus::Sequences => PanelFocus::RightPane,
            PanelFocus::LeftList => PanelFocus::Sequences,
            PanelFocus::RightList => PanelFocus::LeftList,
            PanelFocus::LeftPane => PanelFocus::RightList,
            PanelFocus::RightPane => PanelFocus::LeftPane,
        }
    }

    /// The exchange list side, when an exchange list has focus.
    pub fn list_side(self) -> Option<Side> {
        match self {
            PanelFocus::LeftList => Some(Side::Left),
            PanelFocus::RightList => Some(Side::Right),
            _ => None,
        }
    }

    /// The comparison pane side, when a pane has focus.
    pub fn pane_side(self) -> Option<Side> {
        match self {
            PanelFocus::LeftPane => Some(Side::Left),
            PanelFocus::RightPane => Some(Side::Right),
            _ => None,
        }
    }
}

/// One display line of a comparison pane as `(text, category)` runs, without
/// its line terminator.
pub type PaneLine = Vec<(String, SpanCategory)>;

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    pub focus: PanelFocus,

    /// Owner of sequences, alignment, selections and sync toggles.
    pub controller: SyncController,

    /// Selection in the sequence overview table.
    pub sequence_table_state: TableState,
    /// Widget state of the two exchange lists, mirrored from the controller.
    pub exchange_table_states: [TableState; 2],

    /// Rendered comparison, split into display lines.
    pub panes: [Vec<PaneLine>; 2],
    /// Char length of each rendered pane; drives the scroll-sync binding.
    pub pane_chars: [usize; 2],
    /// The two vertical scroll models. Each pane reads the model its current
    /// `ScrollBinding` points at.
    pub scroll_models: [usize; 2],

    /// Inner heights cached after each render for page scrolling.
    pub sequence_viewport_height: u16,
    pub list_viewport_heights: [u16; 2],
    pub pane_viewport_heights: [u16; 2],

    pub help_scroll: u16,

    /// Generation of the most recent diff request; older results are dropped.
    pub diff_generation: u64,
    /// True while a diff request is in flight.
    pub diff_loading: bool,
    /// Request channel of the diff worker. Without a worker, diffs run inline.
    pub diff_tx: Option<Sender<DiffRequest>>,

    /// One-line feedback shown in the status bar until the next action.
    pub status_message: Option<String>,
}

impl AppState {
    /// Builds the UI state around an already populated controller and issues the
    /// first diff request.
    pub fn new(controller: SyncController, diff_tx: Option<Sender<DiffRequest>>) -> Self {
        let mut state = Self {
            mode: Mode::default(),
            focus: PanelFocus::default(),
            controller,
            sequence_table_state: TableState::default(),
            exchange_table_states: [TableState::default(), TableState::default()],
            panes: [Vec::new(), Vec::new()],
            pane_chars: [0, 0],
            scroll_models: [0, 0],
            sequence_viewport_height: 0,
            list_viewport_heights: [0, 0],
            pane_viewport_heights: [0, 0],
            help_scroll: 0,
            diff_generation: 0,
            diff_loading: false,
            diff_tx,
            status_message: None,
        };
        if !state.controller.state().store().is_empty() {
            state.sequence_table_state.select(Some(0));
        }
        state.sync_tables();
        state.request_diff();
        state
    }

    // ---------------------------------------------------------------------------
    // Sequence overview
    // ---------------------------------------------------------------------------

    /// Sequence ids in overview order.
    pub fn sequence_ids(&self) -> Vec<SequenceId> {
        self.controller.state().store().iter().map(|s| s.id()).collect()
    }

    /// The sequence highlighted in the overview table.
    pub fn selected_sequence(&self) -> Option<SequenceId> {
        let row = self.sequence_table_state.selected()?;
        self.sequence_ids().get(row).copied()
    }

    /// Shows the highlighted sequence on `side`.
    pub fn activate_selected(&mut self, side: Side) {
        let Some(id) = self.selected_sequence() else {
            return;
        };
        match self.controller.set_active_sequence(side, id) {
            Ok(()) => self.after_sequence_change(),
            Err(e) => self.report(e),
        }
    }

    pub fn reverse_selected(&mut self) {
        let Some(id) = self.selected_sequence() else {
            return;
        };
        match self.controller.reverse_sequence(id) {
            Ok(()) => {
                self.status_message = Some(format!("sequence {id} reversed"));
                self.after_sequence_change();
            }
            Err(e) => self.report(e),
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_sequence() else {
            return;
        };
        match self.controller.delete_sequence(id) {
            Ok(()) => {
                let remaining = self.controller.state().store().len();
                let row = self.sequence_table_state.selected().unwrap_or(0);
                self.sequence_table_state
                    .select((remaining > 0).then(|| row.min(remaining - 1)));
                self.status_message = Some(format!("sequence {id} deleted"));
                self.after_sequence_change();
            }
            Err(e) => self.report(e),
        }
    }

    /// Empties both comparison sides; sequences stay in the overview.
    pub fn clear_panels(&mut self) {
        self.controller.clear_active();
        self.after_sequence_change();
    }

    fn after_sequence_change(&mut self) {
        self.sync_tables();
        self.request_diff();
    }

    fn report(&mut self, error: seqcmp_core::CoreError) {
        tracing::warn!(error = %error, "operation rejected");
        self.status_message = Some(error.to_string());
    }

    // ---------------------------------------------------------------------------
    // Exchange selection
    // ---------------------------------------------------------------------------

    /// Copies the controller's row selections into the table widgets.
    fn sync_tables(&mut self) {
        for side in [Side::Left, Side::Right] {
            let selected = self.controller.state().selected(side);
            self.exchange_table_states[side.index()].select(selected);
        }
    }

    fn exchange_count(&self, side: Side) -> usize {
        self.controller.state().active_sequence(side).map_or(0, |s| s.len())
    }

    /// Applies a user selection on `side`, lets selection sync move the other side
    /// and requests a new diff.
    pub fn select_exchange(&mut self, side: Side, index: usize) {
        if let Some(induced) = self.controller.select(SelectionEvent::user(side, index)) {
            self.exchange_table_states[induced.side.index()].select(Some(induced.index));
        }
        self.exchange_table_states[side.index()].select(self.controller.state().selected(side));
        self.request_diff();
    }

    fn move_exchange(&mut self, side: Side, delta: isize) {
        let len = self.exchange_count(side);
        if len == 0 {
            return;
        }
        let current = self.controller.state().selected(side).unwrap_or(0);
        let target = current.saturating_add_signed(delta).min(len - 1);
        if Some(target) != self.controller.state().selected(side) {
            self.select_exchange(side, target);
        }
    }

    fn move_sequence(&mut self, delta: isize) {
        let len = self.controller.state().store().len();
        if len == 0 {
            return;
        }
        let current = self.sequence_table_state.selected().unwrap_or(0);
        self.sequence_table_state
            .select(Some(current.saturating_add_signed(delta).min(len - 1)));
    }

    // ---------------------------------------------------------------------------
    // Comparison panes
    // ---------------------------------------------------------------------------

    /// Sends the selected pair to the diff worker, or clears the panes when either
    /// side has no selection. Every call starts a new generation.
    pub fn request_diff(&mut self) {
        self.diff_generation += 1;
        let state = self.controller.state();
        let pair = state
            .selected_exchange(Side::Left)
            .zip(state.selected_exchange(Side::Right));

        let Some((left, right)) = pair else {
            self.diff_loading = false;
            self.panes = [Vec::new(), Vec::new()];
            self.pane_chars = [0, 0];
            self.scroll_models = [0, 0];
            self.apply_scroll_sync();
            return;
        };

        let request = DiffRequest {
            generation: self.diff_generation,
            left: left.clone(),
            right: right.clone(),
            mode: state.display_mode(),
        };
        self.diff_loading = true;
        if let Some(tx) = &self.diff_tx {
            if tx.send(request).is_err() {
                tracing::error!("diff worker is gone");
                self.diff_loading = false;
            }
            return;
        }
        let payload = worker::run_request(&request);
        self.apply_diff_result(payload);
    }

    /// Installs a worker result. Returns `false` when the result belongs to a
    /// superseded request and was dropped.
    pub fn apply_diff_result(&mut self, payload: DiffPayload) -> bool {
        if payload.generation != self.diff_generation {
            tracing::debug!(
                stale = payload.generation,
                current = self.diff_generation,
                "stale diff result dropped"
            );
            return false;
        }
        let result = payload.result;
        self.panes = [split_pane_lines(&result.left), split_pane_lines(&result.right)];
        self.pane_chars = [result.left.char_len(), result.right.char_len()];
        self.diff_loading = false;
        // Every new comparison is shown from its first line.
        self.scroll_models = [0, 0];
        self.apply_scroll_sync();
        true
    }

    /// Recomputes the scroll binding and returns both models to the top when it
    /// was reapplied.
    fn apply_scroll_sync(&mut self) {
        let update = self.controller.sync_scrolls(self.pane_chars[0], self.pane_chars[1]);
        if update.rebound {
            self.scroll_models = [0, 0];
        }
    }

    /// First visible line of the pane on `side`.
    pub fn pane_offset(&self, side: Side) -> usize {
        let model = self.controller.state().scroll_binding().model_for(side);
        self.scroll_models[model.index()]
    }

    fn scroll_pane(&mut self, side: Side, delta: isize) {
        let binding = self.controller.state().scroll_binding();
        let model = binding.model_for(side);
        // A shared model scrolls as far as the longest pane bound to it.
        let limit = [Side::Left, Side::Right]
            .into_iter()
            .filter(|s| binding.model_for(*s) == model)
            .map(|s| self.panes[s.index()].len())
            .max()
            .unwrap_or(0);
        let offset = &mut self.scroll_models[model.index()];
        *offset = offset.saturating_add_signed(delta).min(limit.saturating_sub(1));
    }

    // ---------------------------------------------------------------------------
    // Toggles
    // ---------------------------------------------------------------------------

    pub fn toggle_display_mode(&mut self) {
        let mode = self.controller.toggle_display_mode();
        self.status_message = Some(format!("showing {}s", mode.label().to_lowercase()));
        self.request_diff();
    }

    pub fn toggle_selection_sync(&mut self) {
        let enabled = !self.controller.state().selection_sync();
        self.controller.set_selection_sync(enabled);
        self.status_message = Some(format!("selection sync {}", on_off(enabled)));
    }

    pub fn toggle_scroll_sync(&mut self) {
        let enabled = !self.controller.state().scroll_sync();
        self.controller.set_scroll_sync(enabled);
        self.apply_scroll_sync();
        self.status_message = Some(format!("scroll sync {}", on_off(enabled)));
    }

    // ---------------------------------------------------------------------------
    // Scrolling (focused panel)
    // ---------------------------------------------------------------------------

    fn shift_focused(&mut self, delta: isize) {
        self.status_message = None;
        match self.focus {
            PanelFocus::Sequences => self.move_sequence(delta),
            PanelFocus::LeftList => self.move_exchange(Side::Left, delta),
            PanelFocus::RightList => self.move_exchange(Side::Right, delta),
            PanelFocus::LeftPane => self.scroll_pane(Side::Left, delta),
            PanelFocus::RightPane => self.scroll_pane(Side::Right, delta),
        }
    }

    fn focused_viewport_height(&self) -> u16 {
        match self.focus {
            PanelFocus::Sequences => self.sequence_viewport_height,
            PanelFocus::LeftList => self.list_viewport_heights[0],
            PanelFocus::RightList => self.list_viewport_heights[1],
            PanelFocus::LeftPane => self.pane_viewport_heights[0],
            PanelFocus::RightPane => self.pane_viewport_heights[1],
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.shift_focused(lines as isize);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.shift_focused(-(lines as isize));
    }

    pub fn scroll_top(&mut self) {
        self.shift_focused(isize::MIN);
    }

    pub fn scroll_bottom(&mut self) {
        self.shift_focused(isize::MAX);
    }

    /// Scrolls by half the focused panel's height (at least one row).
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.focused_viewport_height() / 2).max(1));
    }

    pub fn half_page_up(&mut self) {
        self.scroll_up((self.focused_viewport_height() / 2).max(1));
    }

    pub fn full_page_down(&mut self) {
        self.scroll_down(self.focused_viewport_height().max(1));
    }

    pub fn full_page_up(&mut self) {
        self.scroll_up(self.focused_viewport_height().max(1));
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Splits a rendered pane into display lines of styled runs.
///
/// Terminators are dropped. A highlighted line with no visible text (a blank line
/// that was added or deleted) keeps a single space so its color still shows.
pub fn split_pane_lines(rendered: &RenderedText) -> Vec<PaneLine> {
    let mut lines = Vec::new();
    let mut current: PaneLine = Vec::new();
    for segment in rendered.segments() {
        for piece in segment.text.split_inclusive('\n') {
            let ends_line = piece.ends_with('\n');
            let visible = piece.trim_end_matches(['\n', '\r']);
            if !visible.is_empty() {
                current.push((visible.to_owned(), segment.category));
            } else if ends_line && current.is_empty() && segment.category != SpanCategory::Unchanged {
                current.push((" ".to_owned(), segment.category));
            }
            if ends_line {
                lines.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqcmp_core::{diff, DisplayMode, ExchangeRecord, ScrollBinding};

    fn exchange(path: &str, body: &str) -> ExchangeRecord {
        let request = format!("GET {path} HTTP/1.1\r\nHost: shop.test\r\n\r\n").into_bytes();
        let response = format!("HTTP/1.1 200 OK\r\n\r\n{body}").into_bytes();
        ExchangeRecord::from_raw(0, "http", request, Some(response))
    }

    /// Left: /a, /b, /c. Right: /a, /c with a longer /c body.
    fn app() -> AppState {
        let mut ctl = SyncController::new();
        let left = ctl.add_sequence(None, vec![exchange("/a", "1"), exchange("/b", "2"), exchange("/c", "3")]);
        let right = ctl.add_sequence(None, vec![exchange("/a", "1"), exchange("/c", "3\n4\n5\n6")]);
        ctl.set_active_sequence(Side::Left, left).unwrap();
        ctl.set_active_sequence(Side::Right, right).unwrap();
        ctl.set_selection_sync(true);
        AppState::new(ctl, None)
    }

    #[test]
    fn focus_cycle_round_trips() {
        let mut focus = PanelFocus::Sequences;
        for _ in 0..5 {
            focus = focus.next();
        }
        assert_eq!(focus, PanelFocus::Sequences);
        assert_eq!(PanelFocus::Sequences.prev().next(), PanelFocus::Sequences);
    }

    #[test]
    fn initial_diff_runs_inline_without_worker() {
        let app = app();
        assert_eq!(app.diff_generation, 1);
        assert!(!app.diff_loading);
        assert_eq!(app.panes[0], app.panes[1]);
        assert!(!app.panes[0].is_empty());
    }

    #[test]
    fn list_navigation_syncs_other_side() {
        let mut app = app();
        app.focus = PanelFocus::LeftList;
        app.scroll_bottom();
        assert_eq!(app.exchange_table_states[0].selected(), Some(2));
        assert_eq!(app.exchange_table_states[1].selected(), Some(1));

        // Row 1 on the left has no counterpart; the right side stays put.
        app.scroll_up(1);
        assert_eq!(app.exchange_table_states[0].selected(), Some(1));
        assert_eq!(app.exchange_table_states[1].selected(), Some(1));
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut app = app();
        let stale = DiffPayload { generation: app.diff_generation - 1, result: diff("x\n", "y\n") };
        assert!(!app.apply_diff_result(stale));
        assert_ne!(app.panes[0], vec![vec![("x".to_owned(), SpanCategory::Deleted)]]);

        let fresh = DiffPayload { generation: app.diff_generation, result: diff("x\n", "y\n") };
        assert!(app.apply_diff_result(fresh));
        assert_eq!(app.panes[0], vec![vec![("x".to_owned(), SpanCategory::Deleted)]]);
    }

    #[test]
    fn scroll_sync_shares_longer_model() {
        let mut app = app();
        app.focus = PanelFocus::LeftList;
        app.scroll_bottom();
        app.controller.set_display_mode(DisplayMode::Response);
        app.request_diff();
        app.toggle_scroll_sync();

        assert_eq!(app.controller.state().scroll_binding(), ScrollBinding::shared(Side::Right));
        app.focus = PanelFocus::LeftPane;
        app.scroll_down(2);
        assert_eq!(app.pane_offset(Side::Left), 2);
        assert_eq!(app.pane_offset(Side::Right), 2);

        app.toggle_scroll_sync();
        assert_eq!(app.pane_offset(Side::Left), 0);
        assert_eq!(app.controller.state().scroll_binding(), ScrollBinding::INDEPENDENT);
    }

    #[test]
    fn new_comparison_starts_at_the_top() {
        let mut app = app();
        app.controller.set_display_mode(DisplayMode::Response);
        app.focus = PanelFocus::LeftList;
        app.scroll_bottom();
        assert_eq!(app.panes[1].len(), 6);

        app.focus = PanelFocus::RightPane;
        app.scroll_down(4);
        assert_eq!(app.pane_offset(Side::Right), 4);

        // Back to /a on both sides: three lines each.
        app.focus = PanelFocus::LeftList;
        app.scroll_top();
        assert_eq!(app.panes[1].len(), 3);
        assert_eq!(app.pane_offset(Side::Right), 0);
        assert_eq!(app.pane_offset(Side::Left), 0);
    }

    #[test]
    fn deleting_last_sequence_clears_everything() {
        let mut app = app();
        app.delete_selected();
        app.delete_selected();
        assert_eq!(app.sequence_table_state.selected(), None);
        assert!(app.panes.iter().all(Vec::is_empty));
        assert_eq!(app.exchange_table_states[0].selected(), None);
    }

    #[test]
    fn split_keeps_runs_and_marks_blank_changes() {
        let result = diff("a\nkeep\n", "a\n\nkeep\n");
        let right = split_pane_lines(&result.right);
        assert_eq!(
            right,
            vec![
                vec![("a".to_owned(), SpanCategory::Unchanged)],
                vec![(" ".to_owned(), SpanCategory::Added)],
                vec![("keep".to_owned(), SpanCategory::Unchanged)],
            ]
        );

        let modified = diff("line2\n", "lineX\n");
        assert_eq!(
            split_pane_lines(&modified.left),
            vec![vec![
                ("line".to_owned(), SpanCategory::Unchanged),
                ("2".to_owned(), SpanCategory::Modified),
            ]]
        );
    }
}
