//! Sequence overview panel.
//!
//! One row per imported sequence with its summary. The first and second active
//! sequences are tagged `1` / `2` in the leading column.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table},
};
use seqcmp_core::{status_label, Sequence, Side};

use crate::app::{AppState, PanelFocus};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

const HEADER: [&str; 9] = ["", "ID", "Name", "Requests", "First URL", "Status", "Last URL", "Status", "Length"];

/// Renders the overview table with the `sequence_table_state` selection.
///
/// # Arguments
///
/// * `frame`: current render frame
/// * `area`: the `Rect` for the overview panel (includes borders)
/// * `state`: app state supplying sequences and the table selection
/// * `theme`: active color theme
pub fn render_sequence_table(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus == PanelFocus::Sequences;
    let comparison = state.controller.state();
    let title = format!(" Sequences ({}) ", comparison.store().len());

    if comparison.store().is_empty() {
        let hint = Line::styled("  No sequences. Pass capture files on the command line.", theme.muted);
        frame.render_widget(Paragraph::new(hint).block(panel_block(title, is_focused, theme)), area);
        return;
    }

    let rows: Vec<Row> = comparison
        .store()
        .iter()
        .map(|seq| {
            let tag = match (
                comparison.active(Side::Left) == Some(seq.id()),
                comparison.active(Side::Right) == Some(seq.id()),
            ) {
                (true, true) => "12",
                (true, false) => "1",
                (false, true) => "2",
                (false, false) => "",
            };
            sequence_row(seq, tag)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Fill(2),
        Constraint::Length(6),
        Constraint::Fill(2),
        Constraint::Length(6),
        Constraint::Length(9),
    ];
    let header = Row::new(HEADER).style(Style::default().add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel_block(title, is_focused, theme))
        .row_highlight_style(Style::default().fg(theme.row_selected).add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, &mut state.sequence_table_state);
}

fn sequence_row(seq: &Sequence, tag: &'static str) -> Row<'static> {
    let summary = seq.summary();
    let or_dash = |url: &Option<String>| url.clone().unwrap_or_else(|| "-".to_owned());
    Row::new(vec![
        Cell::from(tag),
        Cell::from(seq.id().to_string()),
        Cell::from(seq.name().to_owned()),
        Cell::from(summary.request_count.to_string()),
        Cell::from(or_dash(&summary.first_url)),
        Cell::from(status_label(summary.first_status)),
        Cell::from(or_dash(&summary.last_url)),
        Cell::from(status_label(summary.last_status)),
        Cell::from(summary.total_length.to_string()),
    ])
}
