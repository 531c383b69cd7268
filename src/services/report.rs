//! Report service
//!
//! Loads the expenses for the seven-day window, either from the store or
//! from generated sample data, and aggregates them.

use chrono::{Local, NaiveDate, TimeZone};
use std::fmt;

use crate::error::SpendlogResult;
use crate::models::Expense;
use crate::reports::{sample_expenses, window_range, WeeklyReport};
use crate::storage::Storage;

/// Where the report's expenses came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportSource {
    #[default]
    Stored,
    Sample,
}

impl ReportSource {
    pub fn from_flag(use_sample_data: bool) -> Self {
        if use_sample_data {
            Self::Sample
        } else {
            Self::Stored
        }
    }
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored => write!(f, "stored expenses"),
            Self::Sample => write!(f, "sample data"),
        }
    }
}

/// A report together with the expenses it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub source: ReportSource,
    /// Newest first
    pub expenses: Vec<Expense>,
    pub report: WeeklyReport,
}

pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Report for the week ending today in the local time zone
    pub fn weekly(&self, source: ReportSource) -> SpendlogResult<ReportData> {
        self.weekly_in(Local::now().date_naive(), &Local, source)
    }

    pub fn weekly_in<Tz: TimeZone>(
        &self,
        today: NaiveDate,
        tz: &Tz,
        source: ReportSource,
    ) -> SpendlogResult<ReportData> {
        let mut expenses = match source {
            ReportSource::Stored => {
                let (start_ms, end_ms) = window_range(today, tz);
                self.storage.expenses.get_by_date_range(start_ms, end_ms)?
            }
            ReportSource::Sample => sample_expenses(today, tz),
        };
        expenses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

        let report = WeeklyReport::generate(&expenses, today, tz);
        tracing::debug!(%source, count = report.count, "weekly report built");

        Ok(ReportData {
            source,
            expenses,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendlogPaths;
    use crate::models::{local_timestamp_millis, ExpenseCategory, Money};
    use chrono::{NaiveTime, Utc};
    use tempfile::TempDir;

    #[test]
    fn test_stored_report_uses_window_only() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();

        for (date, cents) in [((2025, 3, 10), 500), ((2025, 3, 4), 700), ((2025, 3, 3), 900)] {
            let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
            storage
                .expenses
                .insert(Expense::new(
                    "Lunch",
                    Money::from_cents(cents),
                    ExpenseCategory::Food,
                    local_timestamp_millis(&Utc, date, noon),
                ))
                .unwrap();
        }

        let service = ReportService::new(&storage);
        let data = service.weekly_in(today, &Utc, ReportSource::Stored).unwrap();
        assert_eq!(data.expenses.len(), 2);
        assert_eq!(data.report.total, Money::from_cents(1200));

        let sample = service.weekly_in(today, &Utc, ReportSource::Sample).unwrap();
        assert_eq!(sample.source, ReportSource::Sample);
        assert!(sample.report.count > 0);
    }
}
