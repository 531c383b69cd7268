//! Settings screen

use crate::models::ThemeSetting;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsMsg {
    /// The stored theme, as reported by the theme subscription
    ThemeLoaded(ThemeSetting),
    Select(ThemeSetting),
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    SetTheme(ThemeSetting),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsScreen {
    /// Theme currently in effect
    pub theme: ThemeSetting,
    /// Row highlighted in the picker
    pub highlighted: ThemeSetting,
}

fn position(theme: ThemeSetting) -> usize {
    ThemeSetting::ALL
        .iter()
        .position(|t| *t == theme)
        .unwrap_or(0)
}

impl SettingsScreen {
    pub fn new(theme: ThemeSetting) -> Self {
        Self {
            theme,
            highlighted: theme,
        }
    }

    pub fn update(&mut self, msg: SettingsMsg) -> Option<SettingsCommand> {
        match msg {
            SettingsMsg::ThemeLoaded(theme) => {
                self.theme = theme;
                None
            }
            SettingsMsg::Select(theme) => {
                self.highlighted = theme;
                if theme == self.theme {
                    return None;
                }
                Some(SettingsCommand::SetTheme(theme))
            }
            SettingsMsg::Next => {
                let i = (position(self.highlighted) + 1) % ThemeSetting::ALL.len();
                self.highlighted = ThemeSetting::ALL[i];
                None
            }
            SettingsMsg::Previous => {
                let len = ThemeSetting::ALL.len();
                let i = (position(self.highlighted) + len - 1) % len;
                self.highlighted = ThemeSetting::ALL[i];
                None
            }
        }
    }
}
