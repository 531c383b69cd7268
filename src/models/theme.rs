//! Theme preference
//!
//! Stored as a single named value in the preference store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preference key the theme name is stored under
pub const THEME_KEY: &str = "theme_setting";

/// Light/dark appearance preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    Light,
    Dark,
    /// Follow the terminal / system appearance
    #[default]
    System,
}

impl ThemeSetting {
    pub const ALL: [ThemeSetting; 3] = [Self::Light, Self::Dark, Self::System];

    /// Name written to the preference store
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System default",
        }
    }

    /// Read a stored name; missing or unknown names mean "system"
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for ThemeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemeSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" | "system-default" | "system_default" => Ok(Self::System),
            other => Err(format!(
                "Unknown theme '{}'. Choose one of: light, dark, system",
                other
            )),
        }
    }
}
