use ratatui::style::Color;

use crate::models::Theme;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                highlight: Color::Magenta,
                correct: Color::Green,
                incorrect: Color::Red,
                border: Color::Gray,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                highlight: Color::LightMagenta,
                correct: Color::LightGreen,
                incorrect: Color::LightRed,
                border: Color::DarkGray,
            },
        }
    }
}
