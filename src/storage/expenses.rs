//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, hands out ids and
//! pushes fresh query results to subscribers after every write.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendlogError;
use crate::models::{Expense, ExpenseId, Money};

use super::file_io::{read_json, write_json_atomic};
use super::watch::{Subscription, Watchers};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    /// Highest id ever handed out, so ids of deleted expenses are not reused
    #[serde(default)]
    last_id: ExpenseId,
    expenses: Vec<Expense>,
}

/// Filter understood by the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseQuery {
    /// Every stored expense
    All,
    /// A single expense by id
    ById(ExpenseId),
    /// Expenses with `start_ms <= timestamp < end_ms`
    DateRange { start_ms: i64, end_ms: i64 },
    /// Same trimmed title and amount within `[start_ms, end_ms)`
    ExactMatch {
        title: String,
        amount: Money,
        start_ms: i64,
        end_ms: i64,
    },
}

impl ExpenseQuery {
    /// Check whether an expense satisfies the query
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            Self::All => true,
            Self::ById(id) => expense.id == *id,
            Self::DateRange { start_ms, end_ms } => {
                expense.timestamp >= *start_ms && expense.timestamp < *end_ms
            }
            Self::ExactMatch {
                title,
                amount,
                start_ms,
                end_ms,
            } => {
                expense.amount == *amount
                    && expense.title.trim() == title.trim()
                    && expense.timestamp >= *start_ms
                    && expense.timestamp < *end_ms
            }
        }
    }
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<ExpenseId, Expense>>,
    last_id: RwLock<ExpenseId>,
    watchers: Watchers<ExpenseQuery, Vec<Expense>>,
}

/// Newest first; ties broken by id so the order is stable
fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}

fn run_query(data: &BTreeMap<ExpenseId, Expense>, query: &ExpenseQuery) -> Vec<Expense> {
    let mut rows: Vec<Expense> = match query {
        ExpenseQuery::ById(id) => data.get(id).cloned().into_iter().collect(),
        _ => data.values().filter(|e| query.matches(e)).cloned().collect(),
    };
    sort_newest_first(&mut rows);
    rows
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
            last_id: RwLock::new(ExpenseId::UNSAVED),
            watchers: Watchers::new(),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), SpendlogError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut last_id = self.last_id.write().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        *last_id = file_data.last_id;

        for expense in file_data.expenses {
            if !expense.id.is_persisted() {
                tracing::warn!(title = %expense.title, "skipping stored expense without an id");
                continue;
            }
            *last_id = (*last_id).max(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), SpendlogError> {
        let data = self.data.read().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let last_id = self.last_id.read().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        self.write_file(&data, *last_id)
    }

    fn write_file(
        &self,
        data: &BTreeMap<ExpenseId, Expense>,
        last_id: ExpenseId,
    ) -> Result<(), SpendlogError> {
        let mut expenses: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut expenses);

        let file_data = ExpenseData { last_id, expenses };
        write_json_atomic(&self.path, &file_data)
    }

    /// Run a query against the store
    pub fn query(&self, query: &ExpenseQuery) -> Result<Vec<Expense>, SpendlogError> {
        let data = self.data.read().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(run_query(&data, query))
    }

    /// Get an expense by id
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SpendlogError> {
        Ok(self.query(&ExpenseQuery::ById(id))?.into_iter().next())
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, SpendlogError> {
        self.query(&ExpenseQuery::All)
    }

    /// Get expenses with `start_ms <= timestamp < end_ms`
    pub fn get_by_date_range(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Expense>, SpendlogError> {
        self.query(&ExpenseQuery::DateRange { start_ms, end_ms })
    }

    /// Find expenses with the same title and amount inside a time range
    pub fn find_exact_matches(
        &self,
        title: &str,
        amount: Money,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<Expense>, SpendlogError> {
        self.query(&ExpenseQuery::ExactMatch {
            title: title.to_string(),
            amount,
            start_ms,
            end_ms,
        })
    }

    /// Insert a new expense, assigning it a fresh id, and write it to disk
    ///
    /// If the write fails the store is left exactly as it was.
    pub fn insert(&self, mut expense: Expense) -> Result<Expense, SpendlogError> {
        {
            let mut data = self.data.write().map_err(|e| {
                SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            let mut last_id = self.last_id.write().map_err(|e| {
                SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;

            let id = last_id.next();
            expense.id = id;
            data.insert(id, expense.clone());

            if let Err(e) = self.write_file(&data, id) {
                data.remove(&id);
                return Err(e);
            }
            *last_id = id;
        }

        self.notify()?;
        Ok(expense)
    }

    /// Replace a stored expense and write it to disk, returning the
    /// previous version
    ///
    /// Returns `Ok(None)` without writing if no expense has that id.
    pub fn update(&self, expense: Expense) -> Result<Option<Expense>, SpendlogError> {
        let previous = {
            let mut data = self.data.write().map_err(|e| {
                SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            let last_id = self.last_id.read().map_err(|e| {
                SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;

            let id = expense.id;
            let previous = match data.get_mut(&id) {
                Some(slot) => std::mem::replace(slot, expense),
                None => return Ok(None),
            };

            if let Err(e) = self.write_file(&data, *last_id) {
                data.insert(id, previous);
                return Err(e);
            }
            previous
        };

        self.notify()?;
        Ok(Some(previous))
    }

    /// Delete an expense and write the change to disk, returning the
    /// expense if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, SpendlogError> {
        let removed = {
            let mut data = self.data.write().map_err(|e| {
                SpendlogError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            let last_id = self.last_id.read().map_err(|e| {
                SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;

            let removed = match data.remove(&id) {
                Some(expense) => expense,
                None => return Ok(None),
            };

            if let Err(e) = self.write_file(&data, *last_id) {
                data.insert(id, removed);
                return Err(e);
            }
            removed
        };

        self.notify()?;
        Ok(Some(removed))
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, SpendlogError> {
        let data = self.data.read().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    /// Subscribe to a query; the subscription re-emits after every write
    pub fn subscribe(&self, query: ExpenseQuery) -> Result<Subscription<Vec<Expense>>, SpendlogError> {
        let initial = self.query(&query)?;
        self.watchers.add(query, initial)
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.watchers.len()
    }

    fn notify(&self) -> Result<(), SpendlogError> {
        let data = self.data.read().map_err(|e| {
            SpendlogError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        self.watchers.notify(|query| run_query(&data, query))
    }
}
