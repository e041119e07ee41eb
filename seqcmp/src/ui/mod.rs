//! UI rendering module for seqcmp.
//!
//! This is the module root for `ui/`. It exposes `render()` as the single entry
//! point called by the event loop's `terminal.draw()` closure.
//!
//! Layout arithmetic and the status bar live in `layout.rs`. The overview table,
//! the exchange lists and the comparison panes each have their own module.

mod layout;
pub mod compare_view;
pub mod exchange_list;
pub mod help;
pub mod keybindings;
pub mod sequence_table;

use ratatui::Frame;
use seqcmp_core::Side;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, inner_rect, render_status_bar};

/// Renders one complete frame: overview, both exchange lists, both comparison
/// panes and the status bar.
///
/// Viewport heights are written back into `state` before drawing so that page
/// scrolling on the next keypress uses the current terminal size. Table heights
/// exclude their header row.
///
/// # Arguments
///
/// * `frame`: current render frame provided by `terminal.draw()`
/// * `state`: mutable reference to app state (viewport heights are cached here)
/// * `theme`: active color theme
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let sequence_count = state.controller.state().store().len();
    let [sequences, left_list, right_list, left_pane, right_pane, status_bar] =
        compute_layout(frame, sequence_count);

    state.sequence_viewport_height = inner_rect(sequences).height.saturating_sub(1);
    state.list_viewport_heights = [
        inner_rect(left_list).height.saturating_sub(1),
        inner_rect(right_list).height.saturating_sub(1),
    ];
    state.pane_viewport_heights = [inner_rect(left_pane).height, inner_rect(right_pane).height];

    sequence_table::render_sequence_table(frame, sequences, state, theme);
    exchange_list::render_exchange_list(frame, left_list, Side::Left, state, theme);
    exchange_list::render_exchange_list(frame, right_list, Side::Right, state, theme);
    compare_view::render_compare_pane(frame, left_pane, Side::Left, state, theme);
    compare_view::render_compare_pane(frame, right_pane, Side::Right, state, theme);

    render_status_bar(frame, status_bar, state, theme);

    // Drawn last so it sits on top.
    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}
