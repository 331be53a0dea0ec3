use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub green: Color,
    pub red: Color,
    pub yellow: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Green-phosphor default: dark ground, pale green text.
        Theme {
            background: Color::Rgb(0x02, 0x0A, 0x04),
            text: Color::Rgb(0x8F, 0xC9, 0x93),
            text_bright: Color::Rgb(0xE6, 0xFF, 0xE8),
            highlight: Color::Rgb(0x2F, 0xE0, 0x6B),
            dim: Color::Rgb(0x4A, 0x6E, 0x4F),
            green: Color::Rgb(0x2F, 0xE0, 0x6B),
            red: Color::Rgb(0xE0, 0x50, 0x3A),
            yellow: Color::Rgb(0xE0, 0xC8, 0x3A),
            selection_bg: Color::Rgb(0x10, 0x2E, 0x16),
            search_match_bg: Color::Rgb(0x2F, 0xE0, 0x6B),
            search_match_fg: Color::Rgb(0x02, 0x0A, 0x04),
        }
    }
}

/// Parse a hex color string like "#2FE06B" into an RGB Color.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui.colors]` config, falling back to
    /// defaults for anything absent or unparseable.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "green" => theme.green = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "selection_bg" => theme.selection_bg = color,
                    "search_match_bg" => theme.search_match_bg = color,
                    "search_match_fg" => theme.search_match_fg = color,
                    _ => {}
                }
            }
        }
        theme
    }
}
