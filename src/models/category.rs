//! Expense categories
//!
//! Every expense belongs to one of a fixed set of categories. Values read
//! back from storage that do not match a known category land in
//! [`ExpenseCategory::Other`] rather than failing the read.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed category of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Staff,
    Travel,
    Food,
    Utility,
    /// Fallback bucket for unrecognized stored values; never user-selectable
    #[serde(other)]
    Other,
}

impl ExpenseCategory {
    /// Categories a user can pick when entering an expense
    pub const SELECTABLE: [ExpenseCategory; 4] = [
        ExpenseCategory::Staff,
        ExpenseCategory::Travel,
        ExpenseCategory::Food,
        ExpenseCategory::Utility,
    ];

    /// All buckets in display order, fallback last
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Staff,
        ExpenseCategory::Travel,
        ExpenseCategory::Food,
        ExpenseCategory::Utility,
        ExpenseCategory::Other,
    ];

    /// Lowercase storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Travel => "travel",
            Self::Food => "food",
            Self::Utility => "utility",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::Travel => "Travel",
            Self::Food => "Food",
            Self::Utility => "Utility",
            Self::Other => "Other",
        }
    }

    /// Whether the user may pick this category
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Parse leniently: anything unrecognized becomes the fallback bucket
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(Self::Other)
    }

    /// Next selectable category (wraps around)
    pub fn next(self) -> Self {
        match self {
            Self::Staff => Self::Travel,
            Self::Travel => Self::Food,
            Self::Food => Self::Utility,
            Self::Utility | Self::Other => Self::Staff,
        }
    }

    /// Previous selectable category (wraps around)
    pub fn prev(self) -> Self {
        match self {
            Self::Staff | Self::Other => Self::Utility,
            Self::Travel => Self::Staff,
            Self::Food => Self::Travel,
            Self::Utility => Self::Food,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names none of the selectable categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}'. Choose one of: staff, travel, food, utility",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    /// Strict parse of the selectable categories (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "travel" => Ok(Self::Travel),
            "food" => Ok(Self::Food),
            "utility" => Ok(Self::Utility),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
