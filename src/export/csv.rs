//! CSV export
//!
//! One header row and one row per expense. Every field is quoted and
//! embedded quotes are doubled.

use chrono::TimeZone;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

use crate::error::{SpendlogError, SpendlogResult};
use crate::models::Expense;

/// Column headers, in output order
pub const CSV_HEADER: [&str; 8] = [
    "Id", "Title", "Amount", "Category", "Date", "Time", "Note", "Receipt",
];

/// Write `expenses` as CSV, formatting dates and times in `tz`
pub fn export_expenses_csv<W, Tz>(expenses: &[Expense], tz: &Tz, writer: W) -> SpendlogResult<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;

    for expense in expenses {
        let when = expense.datetime_in(tz);
        csv_writer.write_record([
            expense.id.get().to_string(),
            expense.title.clone(),
            expense.amount.to_decimal_string(),
            expense.category.label().to_string(),
            when.format("%Y-%m-%d").to_string(),
            when.format("%H:%M").to_string(),
            expense.note.clone().unwrap_or_default(),
            expense.receipt.clone().unwrap_or_default(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| SpendlogError::Export(format!("Failed to flush CSV: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseId, Money};
    use chrono::Utc;

    fn render(expenses: &[Expense]) -> String {
        let mut buffer = Vec::new();
        export_expenses_csv(expenses, &Utc, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_one_row_per_expense() {
        let expenses: Vec<_> = (1..=3)
            .map(|i| {
                let mut e = Expense::new("Coffee", Money::from_cents(450), ExpenseCategory::Food, 0);
                e.id = ExpenseId::new(i);
                e
            })
            .collect();

        let output = render(&expenses);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            r#""Id","Title","Amount","Category","Date","Time","Note","Receipt""#
        );
        assert_eq!(
            lines[1],
            r#""1","Coffee","4.50","Food","1970-01-01","00:00","","""#
        );
    }

    #[test]
    fn test_quotes_and_commas_are_escaped() {
        let expense = Expense::new(
            r#"Dinner at "Joe's", downtown"#,
            Money::from_cents(4200),
            ExpenseCategory::Food,
            0,
        )
        .with_note("split, 3 ways");

        let output = render(&[expense]);
        assert!(output.contains(r#""Dinner at ""Joe's"", downtown""#));
        assert!(output.contains(r#""split, 3 ways""#));

        let mut reader = csv::Reader::from_reader(output.as_bytes());
        let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], r#"Dinner at "Joe's", downtown"#);
    }

    #[test]
    fn test_empty_export_has_header_only() {
        assert_eq!(render(&[]).lines().count(), 1);
    }
}
