//! Side-by-side comparison panes.
//!
//! Only the visible window of each pane is turned into ratatui `Line`s per frame,
//! starting at the offset of whichever scroll model the pane is bound to.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use seqcmp_core::{Side, SpanCategory};

use crate::app::{AppState, PaneLine};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block, side_title};

/// Renders the comparison pane of `side`.
///
/// # Arguments
///
/// * `frame`: current render frame
/// * `area`: the `Rect` for this pane (includes borders)
/// * `side`: which half of the comparison to draw
/// * `state`: app state supplying pane lines and scroll offsets
/// * `theme`: active color theme
pub fn render_compare_pane(frame: &mut Frame, area: Rect, side: Side, state: &AppState, theme: &Theme) {
    let is_focused = state.focus.pane_side() == Some(side);
    let what = state.controller.state().display_mode().label().to_lowercase();
    let block = panel_block(side_title(state, side, &what), is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let lines = &state.panes[side.index()];
    if lines.is_empty() {
        let msg = if state.diff_loading {
            "Comparing..."
        } else if state.controller.state().selected_exchange(side).is_none() {
            "No exchange selected."
        } else {
            "(empty)"
        };
        frame.render_widget(Paragraph::new(Line::styled(msg, theme.muted)), inner);
        return;
    }

    let start = state.pane_offset(side).min(lines.len());
    let end = (start + inner.height as usize).min(lines.len());
    let visible: Vec<Line> = lines[start..end].iter().map(|line| styled_line(line, theme)).collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

fn styled_line<'a>(line: &'a PaneLine, theme: &Theme) -> Line<'a> {
    Line::from(
        line.iter()
            .map(|(text, category)| Span::styled(text.as_str(), category_style(*category, theme)))
            .collect::<Vec<_>>(),
    )
}

/// Style of a highlight category; `Unchanged` text keeps the pane default.
pub fn category_style(category: SpanCategory, theme: &Theme) -> Style {
    let bg = match category {
        SpanCategory::Unchanged => return Style::default().fg(theme.text),
        SpanCategory::Deleted => theme.span_deleted,
        SpanCategory::Added => theme.span_added,
        SpanCategory::Modified => theme.span_modified,
    };
    Style::default().bg(bg).fg(theme.highlight_fg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_map_to_theme_backgrounds() {
        let theme = Theme::classic();
        assert_eq!(category_style(SpanCategory::Added, &theme).bg, Some(theme.span_added));
        assert_eq!(category_style(SpanCategory::Modified, &theme).bg, Some(theme.span_modified));
        assert_eq!(category_style(SpanCategory::Unchanged, &theme).bg, None);
    }

    #[test]
    fn runs_become_spans() {
        let theme = Theme::dark();
        let line: PaneLine = vec![
            ("line".to_owned(), SpanCategory::Unchanged),
            ("2".to_owned(), SpanCategory::Modified),
        ];
        let rendered = styled_line(&line, &theme);
        assert_eq!(rendered.spans.len(), 2);
        assert_eq!(rendered.spans[1].content, "2");
        assert_eq!(rendered.spans[1].style.bg, Some(theme.span_modified));
    }
}
