//! UI theme: the retro terminal palette, collected in one place.

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub gutter_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub match_bg: Color,
    pub match_fg: Color,
    pub menu_bg: Color,
    pub menu_fg: Color,
    pub menu_selected_bg: Color,
    pub menu_selected_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub error_fg: Color,
    pub hint_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(0x00, 0x00, 0x00),
            fg: Color::Rgb(0x00, 0xff, 0x00),
            gutter_fg: Color::Rgb(0x00, 0x99, 0x00),
            selection_bg: Color::Rgb(0x00, 0xff, 0x00),
            selection_fg: Color::Rgb(0x00, 0x00, 0x00),
            // Same highlight the original notepad used for found text.
            match_bg: Color::Rgb(0xff, 0xff, 0x00),
            match_fg: Color::Rgb(0x00, 0x00, 0x00),
            menu_bg: Color::Rgb(0x33, 0x33, 0x33),
            menu_fg: Color::Rgb(0xff, 0xff, 0xff),
            menu_selected_bg: Color::Rgb(0x00, 0xff, 0x00),
            menu_selected_fg: Color::Rgb(0x00, 0x00, 0x00),
            status_bg: Color::Rgb(0x33, 0x33, 0x33),
            status_fg: Color::Rgb(0xff, 0xff, 0xff),
            error_fg: Color::Rgb(0xff, 0x55, 0x55),
            hint_fg: Color::Rgb(0x88, 0x88, 0x88),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_green_on_black() {
        let theme = Theme::default();
        assert_eq!(theme.bg, Color::Rgb(0, 0, 0));
        assert_eq!(theme.fg, Color::Rgb(0, 255, 0));
        assert_eq!(theme.match_bg, Color::Rgb(255, 255, 0));
    }
}
