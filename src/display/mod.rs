//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and reports for the CLI.

pub mod expense;
pub mod report;

pub use expense::{
    format_day_list, format_expense_details, format_expense_short, format_expense_table,
};
