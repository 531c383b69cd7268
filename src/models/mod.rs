//! Core data models for spendlog
//!
//! This module contains the data structures of the expense domain: the
//! expense itself, its category, money amounts and the theme preference.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod theme;

pub use category::{ExpenseCategory, UnknownCategory};
pub use expense::{local_day_range, local_timestamp_millis, Expense, TimeOfDay, NOTE_MAX_CHARS};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
pub use theme::{ThemeSetting, THEME_KEY};
