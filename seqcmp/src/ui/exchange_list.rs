//! Exchange list panels (one per side).
//!
//! Rows aligned with the other side are tinted by whether their response bodies
//! match. Unaligned rows keep the default style.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table},
};
use seqcmp_core::{ExchangeRecord, RowColor, Side};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{panel_block, side_title};

const HEADER: [&str; 6] = ["#", "Method", "Host", "URL", "Status", "Length"];

/// Renders the exchange list of `side`.
///
/// # Arguments
///
/// * `frame`: current render frame
/// * `area`: the `Rect` for this list (includes borders)
/// * `side`: which active sequence to show
/// * `state`: app state supplying the sequence, row colors and table selection
/// * `theme`: active color theme
pub fn render_exchange_list(frame: &mut Frame, area: Rect, side: Side, state: &mut AppState, theme: &Theme) {
    let is_focused = state.focus.list_side() == Some(side);
    let title = side_title(state, side, "exchanges");
    let comparison = state.controller.state();

    let Some(sequence) = comparison.active_sequence(side) else {
        let key = match side {
            Side::Left => '1',
            Side::Right => '2',
        };
        let hint = Line::styled(format!("  Select a sequence above and press {key}."), theme.muted);
        frame.render_widget(Paragraph::new(hint).block(panel_block(title, is_focused, theme)), area);
        return;
    };

    let colors = comparison.row_colors(side);
    let rows: Vec<Row> = sequence
        .exchanges()
        .iter()
        .enumerate()
        .map(|(row, exchange)| {
            let style = match colors.get(row) {
                Some(RowColor::Match) => Style::default().bg(theme.row_match).fg(theme.highlight_fg),
                Some(RowColor::Mismatch) => Style::default().bg(theme.row_mismatch).fg(theme.highlight_fg),
                None => Style::default(),
            };
            exchange_row(row, exchange).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Fill(3),
        Constraint::Length(6),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(Row::new(HEADER).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(panel_block(title, is_focused, theme))
        .highlight_symbol("▶ ")
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    frame.render_stateful_widget(table, area, &mut state.exchange_table_states[side.index()]);
}

fn exchange_row(row: usize, exchange: &ExchangeRecord) -> Row<'static> {
    Row::new(vec![
        Cell::from((row + 1).to_string()),
        Cell::from(exchange.method.clone()),
        Cell::from(exchange.host.clone()),
        Cell::from(exchange.url.clone()),
        Cell::from(exchange.status_label()),
        Cell::from(exchange.total_len().to_string()),
    ])
}
