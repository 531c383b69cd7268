//! Expense identifiers
//!
//! Expenses are keyed by a numeric id handed out by the store. The value `0`
//! marks an expense that has not been persisted yet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Numeric expense identifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(u64);

impl ExpenseId {
    /// The id carried by expenses that have not been stored yet
    pub const UNSAVED: ExpenseId = ExpenseId(0);

    /// Wrap a raw id
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Check whether this id refers to a persisted expense
    pub const fn is_persisted(&self) -> bool {
        self.0 != 0
    }

    /// The id following this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ExpenseId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}
