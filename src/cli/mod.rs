//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod report;
pub mod settings;

pub use expense::{
    handle_add, handle_delete, handle_edit, handle_list, handle_show, AddArgs, EditArgs, ListArgs,
};
pub use report::{handle_export, handle_report, ExportArgs, ReportArgs};
pub use settings::{handle_audit, handle_config, handle_sync, handle_theme};

use chrono::{Days, Local, NaiveDate, NaiveTime};

use crate::error::{SpendlogError, SpendlogResult};

/// Parse a date argument: `today`, `yesterday` or `YYYY-MM-DD`
pub fn parse_date(input: &str, today: NaiveDate) -> SpendlogResult<NaiveDate> {
    match input.trim().to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| SpendlogError::Validation("Date out of range".into())),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d").map_err(|_| {
            SpendlogError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD, today or yesterday",
                input
            ))
        }),
    }
}

/// Parse a time argument in 24-hour `HH:MM`
pub fn parse_time(input: &str) -> SpendlogResult<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| {
        SpendlogError::Validation(format!("Invalid time '{}'. Use HH:MM (24-hour)", input))
    })
}

pub(crate) fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
