//! Help overlay.
//!
//! A centred modal drawn over the panels in the same `terminal.draw()` closure;
//! `Clear` erases the background first.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay, scrolled by `help_scroll` rows. Skipped on terminals
/// narrower than 60 columns.
///
/// # Arguments
///
/// * `frame`: current render frame
/// * `theme`: active color theme
/// * `help_scroll`: vertical scroll offset
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 60 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help · j/k scroll, ? or Esc to close ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn heading(text: &'static str) -> Line<'static> {
    Line::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        heading("Navigation"),
        Line::from("  Tab / Shift-Tab   Next / previous panel"),
        Line::from("  j / k             Move selection or scroll one line"),
        Line::from("  g / G             First / last row"),
        Line::from("  Ctrl-d / u        Half page down / up"),
        Line::from("  Ctrl-f / b        Full page down / up"),
        Line::from(""),
        heading("Sequences panel"),
        Line::from("  1 / 2             Show selected sequence as first / second"),
        Line::from("  r                 Reverse the selected sequence"),
        Line::from("  x                 Delete the selected sequence"),
        Line::from(""),
        heading("Comparison"),
        Line::from("  c                 Clear both sides"),
        Line::from("  m                 Toggle request / response"),
        Line::from("  s                 Toggle selection sync"),
        Line::from("  S                 Toggle scroll sync"),
        Line::from(""),
        heading("Colors"),
        Line::from("  Rows: aligned by URL; same or different response body"),
        Line::from("  Text: deleted (first only), added (second only),"),
        Line::from("        modified characters inside a changed line"),
        Line::from(""),
        heading("General"),
        Line::from("  ?                 Open / close this help"),
        Line::from("  q / Esc           Quit"),
    ])
}
