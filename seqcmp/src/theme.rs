//! Color themes for seqcmp.
//!
//! A `Theme` holds one `ratatui::style::Color` per UI surface. Three built-in themes
//! are provided:
//!
//! - `dark`: ANSI 16 colors only, safe on any terminal.
//! - `catppuccin-mocha`: Catppuccin Mocha palette in RGB; requires truecolor.
//! - `classic`: the pastel legend colors comparison users know from desktop
//!   proxies (green/orange rows, blue/yellow/orange highlights).

use ratatui::style::Color;

/// All color values used across seqcmp's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // Exchange rows
    /// Row background: aligned and the response bodies are identical.
    pub row_match: Color,
    /// Row background: aligned but the response bodies differ.
    pub row_mismatch: Color,
    /// Foreground of the selected row marker.
    pub row_selected: Color,

    // Comparison panes
    /// Background of whole lines only present on the left.
    pub span_deleted: Color,
    /// Background of whole lines only present on the right.
    pub span_added: Color,
    /// Background of changed characters inside a modified line.
    pub span_modified: Color,
    /// Foreground drawn on top of any colored background.
    pub highlight_fg: Color,
    /// Color for unchanged text.
    pub text: Color,
    /// Placeholder and secondary text.
    pub muted: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Display-mode indicator (`REQUEST` / `RESPONSE`).
    pub status_mode: Color,
    /// Toggle indicator when a sync mode is on.
    pub status_toggle_on: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            row_match: Color::Green,
            row_mismatch: Color::Yellow,
            row_selected: Color::Cyan,

            span_deleted: Color::Blue,
            span_added: Color::Yellow,
            span_modified: Color::Magenta,
            highlight_fg: Color::Black,
            text: Color::Reset,
            muted: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode: Color::Cyan,
            status_toggle_on: Color::Green,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let peach = Color::Rgb(250, 179, 135); // #fab387
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            row_match: green,
            row_mismatch: peach,
            row_selected: lavender,

            span_deleted: blue,
            span_added: yellow,
            span_modified: peach,
            highlight_fg: base,
            text,
            muted: overlay1,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode: lavender,
            status_toggle_on: green,
        }
    }

    /// Returns the pastel legend palette on a plain terminal background.
    pub fn classic() -> Self {
        Self {
            row_match: Color::Rgb(0xb5, 0xff, 0xa1),
            row_mismatch: Color::Rgb(0xff, 0xd7, 0x86),
            span_deleted: Color::Rgb(0x97, 0xc8, 0xf6),
            span_added: Color::Rgb(0xf1, 0xf4, 0x99),
            span_modified: Color::Rgb(0xff, 0xd7, 0x86),
            ..Self::dark()
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark` with a
    /// warning so a typo never prevents startup.
    ///
    /// # Arguments
    ///
    /// * `name`: theme name, e.g. `"dark"`, `"catppuccin-mocha"` or `"classic"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "classic" => Self::classic(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_overrides_only_row_and_span_colors() {
        let classic = Theme::classic();
        let dark = Theme::dark();
        assert_eq!(classic.row_match, Color::Rgb(0xb5, 0xff, 0xa1));
        assert_eq!(classic.span_modified, classic.row_mismatch);
        assert_eq!(classic.border_active, dark.border_active);
    }

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized").border_active, Theme::dark().border_active);
        assert_eq!(
            Theme::from_name("catppuccin_mocha").highlight_fg,
            Theme::catppuccin_mocha().highlight_fg
        );
    }
}
