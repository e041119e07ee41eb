//! Panel layout for seqcmp.
//!
//! Pure layout arithmetic, recomputed inside `terminal.draw()` on every frame so
//! it always reflects the current terminal size.
//!
//! ```text
//! ┌ Sequences ───────────────────────────────┐
//! ├ First exchanges ────┬ Second exchanges ──┤
//! ├ First request ──────┼ Second request ────┤
//! └─────────────────────┴────────────────────┘
//!  legend / toggles / status
//! ```
//!
//! `Spacing::Overlap(1)` with `MergeStrategy::Fuzzy` lets adjacent borders share
//! one cell and merge their junctions.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Color, Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use seqcmp_core::Side;

use crate::app::AppState;
use crate::theme::Theme;

/// Rows the overview table may take, borders and header included.
const MAX_OVERVIEW_HEIGHT: u16 = 8;

/// Returns `[sequences, left_list, right_list, left_pane, right_pane, status_bar]`.
///
/// The overview grows with the number of sequences up to
/// [`MAX_OVERVIEW_HEIGHT`]; the exchange lists take 35% of what remains and the
/// comparison panes fill the rest.
///
/// # Arguments
///
/// * `frame`: current render frame
/// * `sequence_count`: number of rows in the overview table
pub fn compute_layout(frame: &Frame, sequence_count: usize) -> [Rect; 6] {
    let overview_height = (sequence_count as u16).saturating_add(4).min(MAX_OVERVIEW_HEIGHT);

    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let [sequences, lists, panes] = main_area.layout(
        &Layout::vertical([
            Constraint::Length(overview_height),
            Constraint::Percentage(35),
            Constraint::Fill(1),
        ])
        .spacing(Spacing::Overlap(1)),
    );

    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
        .spacing(Spacing::Overlap(1));
    let [left_list, right_list] = lists.layout(&halves);
    let [left_pane, right_pane] = panes.layout(&halves);

    [sequences, left_list, right_list, left_pane, right_pane, status_bar]
}

/// Inner `Rect` of a bordered panel.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block` for a panel; focused panels get a thick border.
///
/// # Arguments
///
/// * `title`: panel title shown in the top border
/// * `is_focused`: `true` when this panel has keyboard focus
/// * `theme`: active color theme
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Title of a per-side panel, e.g. `" First exchanges · checkout #1 "`.
pub fn side_title(state: &AppState, side: Side, what: &str) -> String {
    let label = match side {
        Side::Left => "First",
        Side::Right => "Second",
    };
    match state.controller.state().active_sequence(side) {
        Some(seq) => format!(" {label} {what} · {} #{} ", seq.name(), seq.id()),
        None => format!(" {label} {what} "),
    }
}

/// Renders the 1-row status bar: display mode, sync toggles, color legend and
/// the latest status message.
///
/// # Arguments
///
/// * `frame`: current render frame
/// * `area`: the 1-row `Rect` returned by `compute_layout`
/// * `state`: read-only app state
/// * `theme`: active color theme
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let comparison = state.controller.state();
    let mode_text = format!(" {} ", comparison.display_mode().label().to_uppercase());

    let toggle = |label: &'static str, on: bool| {
        let style = if on {
            Style::default().fg(theme.status_toggle_on).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.status_bar_fg).add_modifier(Modifier::DIM)
        };
        Span::styled(label, style)
    };
    let swatch = |label: &'static str, bg: Color| {
        Span::styled(label, Style::default().bg(bg).fg(theme.highlight_fg))
    };

    let mut spans = vec![
        Span::styled(mode_text, Style::default().fg(theme.status_mode).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        toggle("[s]el-sync", comparison.selection_sync()),
        Span::raw(" "),
        toggle("[S]croll-sync", comparison.scroll_sync()),
        Span::raw("  rows: "),
        swatch(" same response ", theme.row_match),
        Span::raw(" "),
        swatch(" different response ", theme.row_mismatch),
        Span::raw("  text: "),
        swatch(" deleted ", theme.span_deleted),
        Span::raw(" "),
        swatch(" added ", theme.span_added),
        Span::raw(" "),
        swatch(" modified ", theme.span_modified),
    ];
    if state.diff_loading {
        spans.push(Span::raw("  comparing..."));
    } else if let Some(message) = &state.status_message {
        spans.push(Span::raw(format!("  {message}")));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
