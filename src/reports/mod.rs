//! Reports module for spendlog
//!
//! Day view grouping, the seven-day spending report and the sample data the
//! report can be built from.

pub mod daily;
pub mod sample;
pub mod weekly;

pub use daily::{
    group_by_category, group_by_time_of_day, sections, DaySummary, ExpenseGroup, Grouping, Section,
};
pub use sample::sample_expenses;
pub use weekly::{window_range, CategoryTotal, DayTotal, WeeklyReport, REPORT_DAYS};
