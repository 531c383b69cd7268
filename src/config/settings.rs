//! User settings for spendlog
//!
//! Display formats, report behaviour and the default log filter. The theme
//! is not stored here: it lives in the preference store so it can be
//! observed while the application runs.

use serde::{Deserialize, Serialize};

use super::paths::SpendlogPaths;
use crate::error::SpendlogError;

/// Report settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Build reports from generated sample expenses instead of stored ones
    #[serde(default)]
    pub use_sample_data: bool,
}

/// User settings for spendlog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Time format preference (strftime format)
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Report preferences
    #[serde(default)]
    pub report: ReportSettings,

    /// Log filter directive used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_time_format() -> String {
    "%H:%M".to_string()
}

fn default_log_filter() -> String {
    "spendlog=warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            time_format: default_time_format(),
            report: ReportSettings::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SpendlogPaths) -> Result<Self, SpendlogError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SpendlogError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SpendlogError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendlogPaths) -> Result<(), SpendlogError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SpendlogError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SpendlogError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
