//! Expense display formatting
//!
//! Tables for the day list and a detail view for a single expense.

use chrono::{Local, NaiveDate, TimeZone};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Expense;
use crate::reports::{DaySummary, Section};

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn row<Tz: TimeZone>(expense: &Expense, settings: &Settings, tz: &Tz) -> ExpenseRow
where
    Tz::Offset: std::fmt::Display,
{
    ExpenseRow {
        id: expense.id.to_string(),
        time: expense
            .datetime_in(tz)
            .format(&settings.time_format)
            .to_string(),
        title: truncate(&expense.title, 30),
        category: expense.category.label().to_string(),
        amount: expense.amount.format_with_symbol(&settings.currency_symbol),
        note: expense.note.as_deref().map(|n| truncate(n, 30)).unwrap_or_default(),
    }
}

/// Table of expenses
pub fn format_expense_table<Tz: TimeZone>(
    expenses: &[Expense],
    settings: &Settings,
    tz: &Tz,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let rows: Vec<ExpenseRow> = expenses.iter().map(|e| row(e, settings, tz)).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// The day list: summary line, then one table per section
pub fn format_day_list<Tz: TimeZone>(
    summary: &DaySummary,
    sections: &[Section],
    settings: &Settings,
    tz: &Tz,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut output = format!(
        "{}: {} expense{}, total {}\n",
        summary.date.format(&settings.date_format),
        summary.count,
        if summary.count == 1 { "" } else { "s" },
        summary.total.format_with_symbol(&settings.currency_symbol)
    );

    if sections.is_empty() {
        output.push_str("No expenses recorded.\n");
        return output;
    }

    for section in sections {
        if let Some(title) = &section.title {
            output.push_str(&format!(
                "\n{} ({})\n",
                title,
                section.total.format_with_symbol(&settings.currency_symbol)
            ));
        }
        output.push_str(&format_expense_table(&section.expenses, settings, tz));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let when = expense.datetime_in(&Local);
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", expense.id));
    output.push_str(&format!("Title:     {}\n", expense.title));
    output.push_str(&format!(
        "Amount:    {}\n",
        expense.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Category:  {}\n", expense.category.label()));
    output.push_str(&format!(
        "Date:      {} {}\n",
        when.format(&settings.date_format),
        when.format(&settings.time_format)
    ));
    if let Some(note) = &expense.note {
        output.push_str(&format!("Note:      {}\n", note));
    }
    if let Some(receipt) = &expense.receipt {
        output.push_str(&format!("Receipt:   {}\n", receipt));
    }

    output
}

/// One-line form used in confirmations and warnings
pub fn format_expense_short(expense: &Expense, settings: &Settings) -> String {
    let date: NaiveDate = expense.date_in(&Local);
    format!(
        "{} {} {} {} ({})",
        expense.id,
        date.format(&settings.date_format),
        expense.title,
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.category.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseId, Money};
    use crate::reports::{sections, Grouping};
    use chrono::Utc;

    fn stored(title: &str, cents: i64, category: ExpenseCategory, ts: i64) -> Expense {
        let mut expense = Expense::new(title, Money::from_cents(cents), category, ts);
        expense.id = ExpenseId::new(cents as u64);
        expense
    }

    #[test]
    fn test_expense_table_has_rows() {
        let settings = Settings::default();
        let expenses = vec![
            stored("Lunch", 1250, ExpenseCategory::Food, 12 * 3_600_000),
            stored("Taxi", 1800, ExpenseCategory::Travel, 18 * 3_600_000),
        ];

        let table = format_expense_table(&expenses, &settings, &Utc);
        assert!(table.contains("Title"));
        assert!(table.contains("Lunch"));
        assert!(table.contains("$18.00"));
        assert!(table.contains("18:00"));
    }

    #[test]
    fn test_day_list_sections() {
        let settings = Settings::default();
        let expenses = vec![
            stored("Lunch", 1250, ExpenseCategory::Food, 12 * 3_600_000),
            stored("Taxi", 1800, ExpenseCategory::Travel, 18 * 3_600_000),
        ];
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let summary = DaySummary::new(date, &expenses);
        let grouped = sections(&expenses, Grouping::TimeOfDay, &Utc);

        let text = format_day_list(&summary, &grouped, &settings, &Utc);
        assert!(text.starts_with("1970-01-01: 2 expenses, total $30.50"));
        assert!(text.contains("Afternoon ($12.50)"));
        assert!(text.contains("Evening ($18.00)"));

        let empty = format_day_list(&DaySummary::new(date, &[]), &[], &settings, &Utc);
        assert!(empty.contains("No expenses recorded."));
    }

    #[test]
    fn test_details_include_optional_fields() {
        let settings = Settings::default();
        let expense = stored("Hotel", 20000, ExpenseCategory::Travel, 0)
            .with_note("two nights")
            .with_receipt("receipts/hotel.jpg");

        let details = format_expense_details(&expense, &settings);
        assert!(details.contains("two nights"));
        assert!(details.contains("receipts/hotel.jpg"));
        assert!(details.contains("$200.00"));
    }
}
