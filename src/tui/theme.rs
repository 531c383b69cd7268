//! Colour palettes
//!
//! `System` leaves every colour at the terminal default so the user's own
//! light or dark terminal scheme shows through.

use ratatui::style::{Color, Modifier, Style};

use crate::models::ThemeSetting;

/// Colours used by every view and dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub positive: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_setting(theme: ThemeSetting) -> Self {
        match theme {
            ThemeSetting::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::DarkGray,
                selection_fg: Color::White,
                selection_bg: Color::Blue,
                positive: Color::Green,
                warning: Color::Rgb(180, 110, 0),
                error: Color::Red,
            },
            ThemeSetting::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::Gray,
                selection_fg: Color::Black,
                selection_bg: Color::Cyan,
                positive: Color::LightGreen,
                warning: Color::Yellow,
                error: Color::LightRed,
            },
            ThemeSetting::System => Self {
                fg: Color::Reset,
                bg: Color::Reset,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                selection_fg: Color::Reset,
                selection_bg: Color::Reset,
                positive: Color::Green,
                warning: Color::Yellow,
                error: Color::Red,
            },
        }
    }

    /// Base style for text on the background
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlighted row; with terminal colours this falls back to reverse video
    pub fn selected(&self) -> Style {
        if self.selection_bg == Color::Reset {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
                .fg(self.selection_fg)
                .bg(self.selection_bg)
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        let color = if focused { self.accent } else { self.muted };
        Style::default().fg(color).bg(self.bg)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_setting(ThemeSetting::System)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_uses_terminal_colours() {
        let palette = Palette::for_setting(ThemeSetting::System);
        assert_eq!(palette.fg, Color::Reset);
        assert_eq!(palette.bg, Color::Reset);
        assert!(palette.selected().add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_light_and_dark_differ() {
        let light = Palette::for_setting(ThemeSetting::Light);
        let dark = Palette::for_setting(ThemeSetting::Dark);
        assert_ne!(light.fg, dark.fg);
        assert_ne!(light.bg, dark.bg);
        assert_eq!(light.selected().bg, Some(Color::Blue));
    }
}
