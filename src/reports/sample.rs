//! Sample expenses for demonstrating the report
//!
//! The same input always produces the same expenses, spread over the seven
//! days ending on `today`.

use chrono::{Days, NaiveDate, NaiveTime, TimeZone};

use crate::models::{local_timestamp_millis, Expense, ExpenseCategory, ExpenseId, Money};

use super::weekly::REPORT_DAYS;

/// (days before today, hour, minute, title, cents, category)
const SAMPLE_ROWS: &[(u64, u32, u32, &str, i64, ExpenseCategory)] = &[
    (0, 8, 15, "Coffee", 450, ExpenseCategory::Food),
    (0, 13, 0, "Team lunch", 6420, ExpenseCategory::Staff),
    (1, 9, 40, "Train ticket", 1280, ExpenseCategory::Travel),
    (1, 19, 30, "Groceries", 5315, ExpenseCategory::Food),
    (2, 7, 55, "Bus pass", 2500, ExpenseCategory::Travel),
    (2, 18, 10, "Electricity bill", 8900, ExpenseCategory::Utility),
    (3, 12, 20, "Sandwich", 875, ExpenseCategory::Food),
    (4, 10, 0, "Contractor invoice", 15000, ExpenseCategory::Staff),
    (4, 21, 5, "Taxi home", 2240, ExpenseCategory::Travel),
    (5, 16, 45, "Internet", 4999, ExpenseCategory::Utility),
    (6, 11, 30, "Office snacks", 1960, ExpenseCategory::Staff),
    (6, 20, 0, "Dinner", 3775, ExpenseCategory::Food),
];

/// Deterministic sample expenses for the window ending on `today`
pub fn sample_expenses<Tz: TimeZone>(today: NaiveDate, tz: &Tz) -> Vec<Expense> {
    SAMPLE_ROWS
        .iter()
        .filter(|row| row.0 < REPORT_DAYS as u64)
        .enumerate()
        .map(|(i, &(days_ago, hour, minute, title, cents, category))| {
            let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);

            let mut expense = Expense::new(
                title,
                Money::from_cents(cents),
                category,
                local_timestamp_millis(tz, date, time),
            );
            expense.id = ExpenseId::new(i as u64 + 1);
            expense
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::weekly::WeeklyReport;
    use chrono::Utc;

    #[test]
    fn test_sample_is_deterministic_and_in_window() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let first = sample_expenses(today, &Utc);
        let second = sample_expenses(today, &Utc);
        assert_eq!(first, second);

        let report = WeeklyReport::generate(&first, today, &Utc);
        assert_eq!(report.count, first.len());
        assert!(report.daily.iter().all(|d| d.count > 0));
    }
}
