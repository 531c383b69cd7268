//! Theme preference service

use crate::audit::EntityType;
use crate::error::SpendlogResult;
use crate::models::{ThemeSetting, THEME_KEY};
use crate::storage::{Storage, Subscription};

/// Live view of the theme preference
pub struct ThemeSubscription {
    inner: Subscription<Option<String>>,
}

impl ThemeSubscription {
    /// Newest theme since the last call, if it changed
    pub fn latest(&self) -> Option<ThemeSetting> {
        self.inner
            .latest()
            .map(|value| ThemeSetting::from_stored(value.as_deref()))
    }
}

/// Reads and writes the theme preference
pub struct ThemeService<'a> {
    storage: &'a Storage,
}

impl<'a> ThemeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current theme; missing or unknown values read as `System`
    pub fn current(&self) -> SpendlogResult<ThemeSetting> {
        let stored = self.storage.preferences.get(THEME_KEY)?;
        Ok(ThemeSetting::from_stored(stored.as_deref()))
    }

    /// Persist a new theme and return the previous one
    pub fn set(&self, theme: ThemeSetting) -> SpendlogResult<ThemeSetting> {
        let previous = self
            .storage
            .preferences
            .set(THEME_KEY, theme.as_str())?;

        let previous = ThemeSetting::from_stored(previous.as_deref());
        if previous != theme {
            let logged = self.storage.log_update(
                EntityType::Preference,
                THEME_KEY,
                None,
                &previous,
                &theme,
                Some(format!("{} -> {}", previous, theme)),
            );
            if let Err(e) = logged {
                tracing::warn!(error = %e, "theme saved but audit entry not written");
            }
            tracing::info!(from = %previous, to = %theme, "theme changed");
        }

        Ok(previous)
    }

    pub fn subscribe(&self) -> SpendlogResult<ThemeSubscription> {
        Ok(ThemeSubscription {
            inner: self.storage.preferences.subscribe(THEME_KEY)?,
        })
    }
}
