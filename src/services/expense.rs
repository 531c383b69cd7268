//! Expense service
//!
//! Saving, deleting and listing expenses, with the same-day duplicate check
//! applied before any write.

use chrono::{Local, NaiveDate, TimeZone};

use crate::audit::EntityType;
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{local_day_range, Expense, ExpenseId};
use crate::storage::{ExpenseQuery, ExpenseSubscription, Storage};

use super::validation::ExpenseDraft;

/// Whether a save may go ahead when a possible duplicate exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Refuse to write if a same-day duplicate exists
    Check,
    /// The user confirmed; write anyway
    Allow,
}

/// Result of a save attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Expense),
    /// Nothing was written; these stored expenses look identical
    PossibleDuplicate(Vec<Expense>),
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Save using the local time zone for the duplicate check
    pub fn save(&self, draft: ExpenseDraft, policy: DuplicatePolicy) -> SpendlogResult<SaveOutcome> {
        self.save_in(draft, policy, &Local)
    }

    /// Insert a new expense or replace an existing one
    pub fn save_in<Tz: TimeZone>(
        &self,
        draft: ExpenseDraft,
        policy: DuplicatePolicy,
        tz: &Tz,
    ) -> SpendlogResult<SaveOutcome> {
        if policy == DuplicatePolicy::Check {
            let matches = self.find_duplicates(&draft, tz)?;
            if !matches.is_empty() {
                tracing::info!(
                    title = %draft.expense().title,
                    matches = matches.len(),
                    "possible duplicate expense"
                );
                return Ok(SaveOutcome::PossibleDuplicate(matches));
            }
        }

        let expense = draft.into_expense();
        let saved = if expense.is_persisted() {
            self.replace(expense)?
        } else {
            self.insert(expense)?
        };
        Ok(SaveOutcome::Saved(saved))
    }

    fn insert(&self, expense: Expense) -> SpendlogResult<Expense> {
        let stored = self.storage.expenses.insert(expense)?;

        let logged = self.storage.log_create(
            EntityType::Expense,
            stored.id.to_string(),
            Some(stored.title.clone()),
            &stored,
        );
        warn_unaudited(logged, stored.id);

        tracing::info!(id = %stored.id, amount = %stored.amount, "expense created");
        Ok(stored)
    }

    fn replace(&self, expense: Expense) -> SpendlogResult<Expense> {
        let before = self
            .storage
            .expenses
            .update(expense.clone())?
            .ok_or_else(|| SpendlogError::expense_not_found(expense.id.to_string()))?;

        let logged = self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            &before,
            &expense,
            describe_changes(&before, &expense),
        );
        warn_unaudited(logged, expense.id);

        tracing::info!(id = %expense.id, "expense updated");
        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> SpendlogResult<Expense> {
        let removed = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| SpendlogError::expense_not_found(id.to_string()))?;

        let logged = self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            Some(removed.title.clone()),
            &removed,
        );
        warn_unaudited(logged, id);

        tracing::info!(id = %id, "expense deleted");
        Ok(removed)
    }

    /// Stored expenses matching the draft's title and amount on the same
    /// local day, excluding the draft itself when editing
    pub fn find_duplicates<Tz: TimeZone>(
        &self,
        draft: &ExpenseDraft,
        tz: &Tz,
    ) -> SpendlogResult<Vec<Expense>> {
        let expense = draft.expense();
        let (start_ms, end_ms) = local_day_range(tz, expense.date_in(tz));

        let mut matches =
            self.storage
                .expenses
                .find_exact_matches(&expense.title, expense.amount, start_ms, end_ms)?;
        matches.retain(|m| m.id != expense.id);
        Ok(matches)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> SpendlogResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Get an expense by ID, failing if it does not exist
    pub fn require(&self, id: ExpenseId) -> SpendlogResult<Expense> {
        self.get(id)?
            .ok_or_else(|| SpendlogError::expense_not_found(id.to_string()))
    }

    /// All expenses, newest first
    pub fn list_all(&self) -> SpendlogResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Expenses with `start_ms <= timestamp < end_ms`, newest first
    pub fn list_in_range(&self, start_ms: i64, end_ms: i64) -> SpendlogResult<Vec<Expense>> {
        self.storage.expenses.get_by_date_range(start_ms, end_ms)
    }

    /// Expenses on one local calendar day, newest first
    pub fn list_for_day<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> SpendlogResult<Vec<Expense>> {
        let (start_ms, end_ms) = local_day_range(tz, date);
        self.list_in_range(start_ms, end_ms)
    }

    /// Live view of one local calendar day
    pub fn watch_day<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> SpendlogResult<ExpenseSubscription> {
        let (start_ms, end_ms) = local_day_range(tz, date);
        self.storage
            .expenses
            .subscribe(ExpenseQuery::DateRange { start_ms, end_ms })
    }
}

/// The write already reached disk, so a failed audit append is only logged
fn warn_unaudited(logged: SpendlogResult<()>, id: ExpenseId) {
    if let Err(e) = logged {
        tracing::warn!(id = %id, error = %e, "expense saved but audit entry not written");
    }
}

/// Human-readable list of changed fields
fn describe_changes(before: &Expense, after: &Expense) -> Option<String> {
    let mut changes = Vec::new();

    if before.title != after.title {
        changes.push(format!("title: '{}' -> '{}'", before.title, after.title));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!("category: {} -> {}", before.category, after.category));
    }
    if before.timestamp != after.timestamp {
        changes.push("date changed".to_string());
    }
    if before.note != after.note {
        changes.push("note changed".to_string());
    }
    if before.receipt != after.receipt {
        changes.push("receipt changed".to_string());
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::SpendlogPaths;
    use crate::models::{local_timestamp_millis, ExpenseCategory};
    use crate::services::validation::ExpenseForm;
    use chrono::{FixedOffset, NaiveTime, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn at(date: (i32, u32, u32), hour: u32) -> i64 {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        local_timestamp_millis(&Utc, date, NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
    }

    fn draft(title: &str, amount: &str, timestamp: i64) -> ExpenseDraft {
        ExpenseForm {
            title: title.into(),
            amount: amount.into(),
            category: Some(ExpenseCategory::Food),
            timestamp,
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn saved(outcome: SaveOutcome) -> Expense {
        match outcome {
            SaveOutcome::Saved(e) => e,
            other => panic!("expected Saved, got {:?}", other),
        }
    }

    #[test]
    fn test_save_new_expense() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = saved(
            service
                .save_in(draft("Lunch", "12.50", at((2025, 3, 10), 12)), DuplicatePolicy::Check, &Utc)
                .unwrap(),
        );

        assert!(expense.is_persisted());
        assert_eq!(service.list_all().unwrap().len(), 1);

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, Operation::Create);
    }

    #[test]
    fn test_same_day_duplicate_is_flagged() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let first = saved(
            service
                .save_in(draft("Lunch", "12.50", at((2025, 3, 10), 9)), DuplicatePolicy::Check, &Utc)
                .unwrap(),
        );

        let outcome = service
            .save_in(draft("Lunch", "12.50", at((2025, 3, 10), 20)), DuplicatePolicy::Check, &Utc)
            .unwrap();
        assert_eq!(outcome, SaveOutcome::PossibleDuplicate(vec![first]));
        assert_eq!(service.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_confirmed_duplicate_is_saved() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let ts = at((2025, 3, 10), 9);

        service
            .save_in(draft("Lunch", "12.50", ts), DuplicatePolicy::Check, &Utc)
            .unwrap();
        saved(
            service
                .save_in(draft("Lunch", "12.50", ts), DuplicatePolicy::Allow, &Utc)
                .unwrap(),
        );

        assert_eq!(service.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_different_day_amount_or_title_is_not_duplicate() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        service
            .save_in(draft("Lunch", "12.50", at((2025, 3, 10), 9)), DuplicatePolicy::Check, &Utc)
            .unwrap();

        for candidate in [
            draft("Lunch", "12.50", at((2025, 3, 11), 9)),
            draft("Lunch", "12.51", at((2025, 3, 10), 9)),
            draft("Dinner", "12.50", at((2025, 3, 10), 9)),
        ] {
            assert!(service.find_duplicates(&candidate, &Utc).unwrap().is_empty());
        }
    }

    #[test]
    fn test_calendar_day_follows_time_zone() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let plus_five = FixedOffset::east_opt(5 * 3600).unwrap();

        // 21:00 and 22:00 UTC on the 10th are both the 11th at +05:00
        service
            .save_in(draft("Taxi", "8", at((2025, 3, 10), 21)), DuplicatePolicy::Check, &plus_five)
            .unwrap();
        let late = draft("Taxi", "8", at((2025, 3, 10), 22));

        assert_eq!(service.find_duplicates(&late, &plus_five).unwrap().len(), 1);

        // But 18:00 UTC is still the 10th at +05:00
        let earlier = draft("Taxi", "8", at((2025, 3, 10), 18));
        assert!(service.find_duplicates(&earlier, &plus_five).unwrap().is_empty());
    }

    #[test]
    fn test_edit_does_not_match_itself() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let stored = saved(
            service
                .save_in(draft("Lunch", "12.50", at((2025, 3, 10), 9)), DuplicatePolicy::Check, &Utc)
                .unwrap(),
        );

        let mut form = ExpenseForm::from_expense(&stored);
        form.note = "with team".into();
        let updated = saved(
            service
                .save_in(form.validate().unwrap(), DuplicatePolicy::Check, &Utc)
                .unwrap(),
        );

        assert_eq!(updated.id, stored.id);
        assert_eq!(service.require(stored.id).unwrap().note.as_deref(), Some("with team"));

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit[1].operation, Operation::Update);
        assert_eq!(audit[1].diff_summary.as_deref(), Some("note changed"));
    }

    #[test]
    fn test_edit_unknown_id_is_not_found() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let mut form = ExpenseForm::from_expense(draft("Lunch", "1", 0).expense());
        form.id = ExpenseId::new(42);
        let err = service
            .save_in(form.validate().unwrap(), DuplicatePolicy::Allow, &Utc)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let stored = saved(
            service
                .save_in(draft("Lunch", "3", 0), DuplicatePolicy::Check, &Utc)
                .unwrap(),
        );
        assert_eq!(service.delete(stored.id).unwrap().title, "Lunch");
        assert!(service.delete(stored.id).unwrap_err().is_not_found());
        assert!(service.get(stored.id).unwrap().is_none());
    }

    #[test]
    fn test_list_for_day_and_watch() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        let sub = service.watch_day(day, &Utc).unwrap();
        assert_eq!(sub.latest().unwrap().len(), 0);

        service
            .save_in(draft("Breakfast", "4", at((2025, 3, 10), 8)), DuplicatePolicy::Check, &Utc)
            .unwrap();
        service
            .save_in(draft("Dinner", "20", at((2025, 3, 11), 19)), DuplicatePolicy::Check, &Utc)
            .unwrap();

        let rows = service.list_for_day(day, &Utc).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Breakfast");
        assert_eq!(sub.latest().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_write_can_be_retried_without_duplicate_warning() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expenses_file = storage.paths().expenses_file();
        let blocker = expenses_file.with_file_name("expenses.json.tmp");
        std::fs::create_dir_all(&blocker).unwrap();

        let lunch = draft("Lunch", "12.50", at((2025, 3, 10), 12));
        assert!(service.save_in(lunch.clone(), DuplicatePolicy::Check, &Utc).is_err());
        assert!(service.list_all().unwrap().is_empty());
        assert!(storage.audit().read_all().unwrap().is_empty());

        std::fs::remove_dir(&blocker).unwrap();
        saved(service.save_in(lunch, DuplicatePolicy::Check, &Utc).unwrap());
        assert_eq!(service.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_audit_failure_does_not_fail_the_save() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        std::fs::create_dir_all(storage.paths().audit_log()).unwrap();

        let stored = saved(
            service
                .save_in(draft("Lunch", "12.50", 0), DuplicatePolicy::Check, &Utc)
                .unwrap(),
        );
        assert_eq!(service.require(stored.id).unwrap(), stored);
        assert_eq!(service.delete(stored.id).unwrap(), stored);
    }
}
