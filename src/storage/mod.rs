//! Storage layer for spendlog
//!
//! Provides JSON file storage with atomic writes, automatic directory
//! creation and reactive query subscriptions.

pub mod expenses;
pub mod file_io;
pub mod preferences;
pub mod watch;

pub use expenses::{ExpenseQuery, ExpenseRepository};
pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use preferences::PreferenceStore;
pub use watch::Subscription;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::SpendlogPaths;
use crate::error::SpendlogResult;

/// Live query over the expense store
pub type ExpenseSubscription = Subscription<Vec<crate::models::Expense>>;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendlogPaths,
    pub expenses: ExpenseRepository,
    pub preferences: PreferenceStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: SpendlogPaths) -> SpendlogResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            preferences: PreferenceStore::new(paths.preferences_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Open storage and load everything from disk
    pub fn open(paths: SpendlogPaths) -> SpendlogResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SpendlogPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> SpendlogResult<()> {
        self.expenses.load()?;
        self.preferences.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> SpendlogResult<()> {
        self.expenses.save()?;
        self.preferences.save()?;
        Ok(())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendlogResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> SpendlogResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendlogResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("exports").exists());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_audit_helpers_append() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        storage
            .log_create(EntityType::Preference, "theme_setting", None, &"dark")
            .unwrap();
        storage
            .log_delete(EntityType::Preference, "theme_setting", None, &"dark")
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Delete);
    }
}
