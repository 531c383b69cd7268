//! Seven-day spending report
//!
//! Covers `today` and the six days before it, with day boundaries at local
//! midnight. All sums are exact integer cents; only the percentages are
//! floating point.

use chrono::{Days, NaiveDate, TimeZone};
use std::collections::BTreeMap;

use crate::display::report::{format_bar, format_percentage, separator};
use crate::models::{local_day_range, Expense, ExpenseCategory, Money};

/// Number of days covered by the report
pub const REPORT_DAYS: usize = 7;

const BAR_WIDTH: usize = 24;

/// Spending on one day of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: Money,
    pub count: usize,
}

/// Spending in one category over the window
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Money,
    pub count: usize,
    /// Share of the grand total, 0-100
    pub percentage: f64,
}

/// Seven-day spending report
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Oldest day first; days without spending are zero
    pub daily: [DayTotal; REPORT_DAYS],
    /// Categories with spending, largest first
    pub categories: Vec<CategoryTotal>,
    pub total: Money,
    pub count: usize,
}

/// First day of the window ending on `today`
pub fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(REPORT_DAYS as u64 - 1))
        .unwrap_or(today)
}

/// Half-open millisecond range of the window ending on `today`
pub fn window_range<Tz: TimeZone>(today: NaiveDate, tz: &Tz) -> (i64, i64) {
    let (start_ms, _) = local_day_range(tz, window_start(today));
    let (_, end_ms) = local_day_range(tz, today);
    (start_ms, end_ms)
}

impl WeeklyReport {
    /// Aggregate `expenses` over the window ending on `today`; expenses
    /// outside the window are ignored
    pub fn generate<Tz: TimeZone>(expenses: &[Expense], today: NaiveDate, tz: &Tz) -> Self {
        let start_date = window_start(today);

        let mut daily: [DayTotal; REPORT_DAYS] = std::array::from_fn(|i| DayTotal {
            date: start_date
                .checked_add_days(Days::new(i as u64))
                .unwrap_or(start_date),
            total: Money::zero(),
            count: 0,
        });

        let mut by_category: BTreeMap<ExpenseCategory, (Money, usize)> = BTreeMap::new();
        let mut total = Money::zero();
        let mut count = 0;

        for expense in expenses {
            let offset = (expense.date_in(tz) - start_date).num_days();
            let Some(day) = usize::try_from(offset).ok().and_then(|i| daily.get_mut(i)) else {
                continue;
            };

            day.total += expense.amount;
            day.count += 1;

            let entry = by_category
                .entry(expense.category)
                .or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;

            total += expense.amount;
            count += 1;
        }

        let mut categories: Vec<CategoryTotal> = if total.is_zero() {
            Vec::new()
        } else {
            by_category
                .into_iter()
                .filter(|(_, (amount, _))| !amount.is_zero())
                .map(|(category, (amount, n))| CategoryTotal {
                    category,
                    total: amount,
                    count: n,
                    percentage: amount.cents() as f64 / total.cents() as f64 * 100.0,
                })
                .collect()
        };

        // Stable sort keeps category order for equal amounts
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Self {
            start_date,
            end_date: today,
            daily,
            categories,
            total,
            count,
        }
    }

    /// Largest single-day total, for scaling bars
    pub fn max_daily(&self) -> Money {
        self.daily
            .iter()
            .map(|d| d.total)
            .max()
            .unwrap_or_default()
    }

    /// The `limit` largest categories
    pub fn top_categories(&self, limit: usize) -> &[CategoryTotal] {
        &self.categories[..limit.min(self.categories.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending Report: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total: {}   Expenses: {}\n\n",
            self.total.format_with_symbol(currency),
            self.count
        ));

        output.push_str("By day\n");
        output.push_str(&separator(60));
        output.push('\n');
        let max_daily = self.max_daily().as_f64();
        for day in &self.daily {
            output.push_str(&format!(
                "{} {:<10} {:>12}  {}\n",
                day.date.format("%a"),
                day.date,
                day.total.format_with_symbol(currency),
                format_bar(day.total.as_f64(), max_daily, BAR_WIDTH)
            ));
        }

        output.push_str("\nBy category\n");
        output.push_str(&separator(60));
        output.push('\n');
        if self.categories.is_empty() {
            output.push_str("No spending in this period.\n");
        }
        for category in &self.categories {
            output.push_str(&format!(
                "{:<14} {:>12} {:>7}  {}\n",
                category.category.label(),
                category.total.format_with_symbol(currency),
                format_percentage(category.percentage),
                format_bar(category.percentage, 100.0, BAR_WIDTH)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::local_timestamp_millis;
    use chrono::{FixedOffset, NaiveTime, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn spent(days_ago: u64, hour: u32, category: ExpenseCategory, cents: i64) -> Expense {
        let date = today().checked_sub_days(Days::new(days_ago)).unwrap();
        let ts = local_timestamp_millis(&Utc, date, NaiveTime::from_hms_opt(hour, 0, 0).unwrap());
        Expense::new("x", Money::from_cents(cents), category, ts)
    }

    fn sample() -> Vec<Expense> {
        vec![
            spent(0, 9, ExpenseCategory::Food, 1250),
            spent(0, 18, ExpenseCategory::Travel, 4000),
            spent(2, 12, ExpenseCategory::Food, 750),
            spent(6, 0, ExpenseCategory::Utility, 9999),
            spent(5, 23, ExpenseCategory::Other, 1),
            // Outside the window
            spent(7, 12, ExpenseCategory::Staff, 50000),
        ]
    }

    #[test]
    fn test_window_is_seven_days_ending_today() {
        let report = WeeklyReport::generate(&[], today(), &Utc);
        assert_eq!(report.start_date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(report.daily[6].date, today());
        assert!(report.daily.iter().all(|d| d.total.is_zero()));
        assert!(report.categories.is_empty());
        assert!(report.is_empty());
    }

    #[test]
    fn test_daily_category_and_grand_totals_agree() {
        let report = WeeklyReport::generate(&sample(), today(), &Utc);

        let daily_sum: Money = report.daily.iter().map(|d| d.total).sum();
        let category_sum: Money = report.categories.iter().map(|c| c.total).sum();
        assert_eq!(daily_sum, report.total);
        assert_eq!(category_sum, report.total);
        assert_eq!(report.total, Money::from_cents(1250 + 4000 + 750 + 9999 + 1));
        assert_eq!(report.count, 5);
        assert_eq!(report.daily[0].total, Money::from_cents(9999));
        assert_eq!(report.daily[6].count, 2);
    }

    #[test]
    fn test_categories_sorted_with_percentages() {
        let report = WeeklyReport::generate(&sample(), today(), &Utc);

        let order: Vec<_> = report.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![
                ExpenseCategory::Utility,
                ExpenseCategory::Travel,
                ExpenseCategory::Food,
                ExpenseCategory::Other
            ]
        );

        let pct_sum: f64 = report.categories.iter().map(|c| c.percentage).sum();
        assert!((pct_sum - 100.0).abs() < 1e-9);
        assert_eq!(report.top_categories(2).len(), 2);
        assert_eq!(report.top_categories(10).len(), 4);
    }

    #[test]
    fn test_equal_amounts_keep_category_order() {
        let expenses = vec![
            spent(1, 10, ExpenseCategory::Utility, 500),
            spent(1, 11, ExpenseCategory::Staff, 500),
        ];
        let report = WeeklyReport::generate(&expenses, today(), &Utc);
        assert_eq!(report.categories[0].category, ExpenseCategory::Staff);
        assert_eq!(report.categories[0].percentage, 50.0);
    }

    #[test]
    fn test_day_boundaries_follow_time_zone() {
        // 23:00 UTC on the 9th is already the 10th at +02:00
        let expenses = vec![spent(1, 23, ExpenseCategory::Food, 100)];
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        let utc = WeeklyReport::generate(&expenses, today(), &Utc);
        let shifted = WeeklyReport::generate(&expenses, today(), &plus_two);
        assert_eq!(utc.daily[5].count, 1);
        assert_eq!(shifted.daily[6].count, 1);
    }

    #[test]
    fn test_window_range_spans_seven_days() {
        let (start, end) = window_range(today(), &Utc);
        assert_eq!(end - start, 7 * 24 * 60 * 60 * 1000);
    }

    #[test]
    fn test_format_terminal() {
        let report = WeeklyReport::generate(&sample(), today(), &Utc);
        let text = report.format_terminal("$");
        assert!(text.contains("2025-03-04 to 2025-03-10"));
        assert!(text.contains("Utility"));
        assert!(text.contains("$160.00"));
        assert!(text.contains("$99.99"));

        let empty = WeeklyReport::generate(&[], today(), &Utc).format_terminal("€");
        assert!(empty.contains("No spending in this period."));
        assert!(empty.contains("€0.00"));
    }
}
