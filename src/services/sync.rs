//! Mock sync
//!
//! Stands in for a remote sync. No network I/O happens; the service counts
//! what would be sent and remembers when it last ran.

use chrono::{DateTime, Utc};

use crate::error::SpendlogResult;
use crate::storage::Storage;

/// Preference key holding the RFC 3339 time of the last sync
pub const LAST_SYNCED_KEY: &str = "last_synced_at";

/// What a sync run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Expenses that would have been uploaded
    pub expense_count: usize,
    pub synced_at: DateTime<Utc>,
    pub previous_sync: Option<DateTime<Utc>>,
}

pub struct SyncService<'a> {
    storage: &'a Storage,
}

impl<'a> SyncService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Run a sync at the current time
    pub fn sync(&self) -> SpendlogResult<SyncReport> {
        self.sync_at(Utc::now())
    }

    pub fn sync_at(&self, now: DateTime<Utc>) -> SpendlogResult<SyncReport> {
        let expense_count = self.storage.expenses.count()?;
        let previous_sync = self.last_synced_at()?;

        self.storage
            .preferences
            .set(LAST_SYNCED_KEY, now.to_rfc3339())?;

        tracing::info!(expenses = expense_count, "mock sync complete");

        Ok(SyncReport {
            expense_count,
            synced_at: now,
            previous_sync,
        })
    }

    /// Time of the last sync; an unreadable stored value counts as never
    pub fn last_synced_at(&self) -> SpendlogResult<Option<DateTime<Utc>>> {
        let stored = self.storage.preferences.get(LAST_SYNCED_KEY)?;
        Ok(stored
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendlogPaths;
    use crate::models::{Expense, ExpenseCategory, Money};
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_sync_records_time_and_count() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        storage
            .expenses
            .insert(Expense::new("Fuel", Money::from_cents(4000), ExpenseCategory::Travel, 0))
            .unwrap();

        let service = SyncService::new(&storage);
        assert_eq!(service.last_synced_at().unwrap(), None);

        let first = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let report = service.sync_at(first).unwrap();
        assert_eq!(report.expense_count, 1);
        assert_eq!(report.previous_sync, None);

        let second = Utc.with_ymd_and_hms(2025, 3, 11, 8, 0, 0).unwrap();
        let report = service.sync_at(second).unwrap();
        assert_eq!(report.previous_sync, Some(first));
        assert_eq!(service.last_synced_at().unwrap(), Some(second));
    }
}
