//! PDF export
//!
//! Lays the weekly report out on fixed A4 pages and serializes it as a
//! self-contained PDF 1.4 file using the standard Helvetica fonts, so no
//! font data has to be embedded.

use chrono::TimeZone;
use std::io::Write;

use crate::display::report::{bar_cells, format_percentage};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::Expense;
use crate::reports::WeeklyReport;

/// A4 in points
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;

const MARGIN: f32 = 50.0;
const LINE_HEIGHT: f32 = 16.0;
const BODY_SIZE: f32 = 10.0;
const BAR_MAX_WIDTH: f32 = 200.0;
const BAR_HEIGHT: f32 = 8.0;
const BAR_X: f32 = 300.0;

#[derive(Debug, Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Content streams for each page, filled top to bottom
struct PageLayout {
    pages: Vec<String>,
    cursor_y: f32,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: vec![String::new()],
            cursor_y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn current(&mut self) -> &mut String {
        if self.pages.is_empty() {
            self.pages.push(String::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Start a new page if `height` more points do not fit
    fn reserve(&mut self, height: f32) {
        if self.cursor_y - height < MARGIN {
            self.pages.push(String::new());
            self.cursor_y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text_at(&mut self, x: f32, font: Font, size: f32, text: &str) {
        let y = self.cursor_y;
        let op = format!(
            "BT /{} {} Tf {:.1} {:.1} Td ({}) Tj ET\n",
            font.resource(),
            size,
            x,
            y,
            escape_text(text)
        );
        self.current().push_str(&op);
    }

    fn bar_at(&mut self, x: f32, width: f32) {
        if width <= 0.0 {
            return;
        }
        let y = self.cursor_y - 1.0;
        let op = format!(
            "0.35 0.55 0.85 rg {:.1} {:.1} {:.1} {:.1} re f 0 g\n",
            x, y, width, BAR_HEIGHT
        );
        self.current().push_str(&op);
    }

    /// One line of text columns, moving the cursor down
    fn line(&mut self, font: Font, columns: &[(f32, &str)]) {
        self.reserve(LINE_HEIGHT);
        for (x, text) in columns {
            self.text_at(*x, font, BODY_SIZE, text);
        }
        self.cursor_y -= LINE_HEIGHT;
    }

    /// A line with a trailing bar
    fn bar_line(&mut self, columns: &[(f32, &str)], filled: usize, cells: usize) {
        self.reserve(LINE_HEIGHT);
        for (x, text) in columns {
            self.text_at(*x, Font::Regular, BODY_SIZE, text);
        }
        let width = BAR_MAX_WIDTH * filled as f32 / cells.max(1) as f32;
        self.bar_at(BAR_X, width);
        self.cursor_y -= LINE_HEIGHT;
    }

    fn heading(&mut self, size: f32, text: &str) {
        // Keep a heading together with at least one line below it
        self.reserve(size + 6.0 + LINE_HEIGHT);
        self.text_at(MARGIN, Font::Bold, size, text);
        self.cursor_y -= size + 6.0;
    }

    fn gap(&mut self) {
        self.cursor_y -= LINE_HEIGHT / 2.0;
    }
}

/// Escape a string for a PDF literal, mapping to WinAnsi bytes
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            '€' => escaped.push_str("\\200"),
            '\u{a0}'..='\u{ff}' => escaped.push_str(&format!("\\{:03o}", c as u32)),
            _ => escaped.push('?'),
        }
    }
    escaped
}

fn lay_out<Tz>(
    report: &WeeklyReport,
    expenses: &[Expense],
    currency: &str,
    tz: &Tz,
) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    const CELLS: usize = 100;
    let mut layout = PageLayout::new();
    let money = |m: crate::models::Money| m.format_with_symbol(currency);

    // Title block
    layout.heading(20.0, "Weekly Spending Report");
    let range = format!("{} to {}", report.start_date, report.end_date);
    layout.line(Font::Regular, &[(MARGIN, range.as_str())]);
    let total = format!("Total: {}", money(report.total));
    let count = format!("Expenses: {}", report.count);
    layout.line(Font::Bold, &[(MARGIN, total.as_str()), (BAR_X, count.as_str())]);
    layout.gap();

    layout.heading(14.0, "By day");
    let max_daily = report.max_daily().as_f64();
    for day in &report.daily {
        let label = day.date.format("%a %Y-%m-%d").to_string();
        let amount = money(day.total);
        let filled = bar_cells(day.total.as_f64(), max_daily, CELLS);
        layout.bar_line(&[(MARGIN, label.as_str()), (200.0, amount.as_str())], filled, CELLS);
    }
    layout.gap();

    layout.heading(14.0, "By category");
    if report.categories.is_empty() {
        layout.line(Font::Regular, &[(MARGIN, "No spending in this period.")]);
    }
    for category in &report.categories {
        let amount = money(category.total);
        let pct = format_percentage(category.percentage);
        let filled = bar_cells(category.percentage, 100.0, CELLS);
        layout.bar_line(
            &[(MARGIN, category.category.label()), (160.0, amount.as_str()), (240.0, pct.as_str())],
            filled,
            CELLS,
        );
    }

    if !expenses.is_empty() {
        layout.gap();
        layout.heading(14.0, "Expenses");
        layout.line(
            Font::Bold,
            &[(MARGIN, "Date"), (150.0, "Title"), (360.0, "Category"), (460.0, "Amount")],
        );
        for expense in expenses {
            let when = expense.datetime_in(tz).format("%Y-%m-%d %H:%M").to_string();
            let title = crate::display::report::truncate(&expense.title, 36);
            let amount = money(expense.amount);
            layout.line(
                Font::Regular,
                &[
                    (MARGIN, when.as_str()),
                    (150.0, title.as_str()),
                    (360.0, expense.category.label()),
                    (460.0, amount.as_str()),
                ],
            );
        }
    }

    layout.pages
}

/// Serialize page content streams into a PDF file
fn write_document<W: Write>(pages: &[String], writer: &mut W) -> std::io::Result<()> {
    // 1 catalog, 2 page tree, 3-4 fonts, then a page and content object per page
    let page_id = |i: usize| 5 + 2 * i;
    let content_id = |i: usize| 6 + 2 * i;

    let mut objects: Vec<Vec<u8>> = Vec::new();
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect();
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .into_bytes(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    for (i, content) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                content_id(i)
            )
            .into_bytes(),
        );

        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(content.as_bytes());
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    writer.write_all(&out)?;
    writer.flush()
}

/// Render the report, followed by the expense listing, as a PDF
pub fn export_report_pdf<W, Tz>(
    report: &WeeklyReport,
    expenses: &[Expense],
    currency: &str,
    tz: &Tz,
    writer: &mut W,
) -> SpendlogResult<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let pages = lay_out(report, expenses, currency, tz);
    write_document(&pages, writer)
        .map_err(|e| SpendlogError::Export(format!("Failed to write PDF: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::{NaiveDate, Utc};

    fn render(expenses: &[Expense]) -> Vec<u8> {
        let today = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let report = WeeklyReport::generate(expenses, today, &Utc);
        let mut buffer = Vec::new();
        export_report_pdf(&report, expenses, "$", &Utc, &mut buffer).unwrap();
        buffer
    }

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn lunches(n: usize) -> Vec<Expense> {
        (0..n)
            .map(|i| Expense::new("Lunch", Money::from_cents(1000), ExpenseCategory::Food, i as i64))
            .collect()
    }

    #[test]
    fn test_document_structure() {
        let bytes = render(&lunches(2));
        let text = as_text(&bytes);

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("(Weekly Spending Report) Tj"));
        assert!(text.contains("(By category) Tj"));
        assert!(text.contains("($20.00) Tj"));
    }

    #[test]
    fn test_startxref_points_at_xref_table() {
        let bytes = render(&lunches(1));
        let text = as_text(&bytes);

        let marker = text.rfind("startxref\n").unwrap();
        let offset: usize = text[marker + 10..]
            .lines()
            .next()
            .unwrap()
            .trim()
            .parse()
            .unwrap();
        assert!(bytes[offset..].starts_with(b"xref"));
    }

    #[test]
    fn test_long_listing_continues_on_new_pages() {
        let bytes = render(&lunches(150));
        let text = as_text(&bytes);

        let pages = text.matches("/Type /Page ").count();
        assert!(pages >= 3, "expected several pages, got {pages}");
        assert!(text.contains(&format!("/Count {}", pages)));
    }

    #[test]
    fn test_empty_report_still_renders() {
        let text = as_text(&render(&[]));
        assert!(text.contains("(No spending in this period.) Tj"));
        assert!(!text.contains("(Expenses) Tj"));
    }

    #[test]
    fn test_text_escaping() {
        assert_eq!(escape_text("a (b) \\ c"), "a \\(b\\) \\\\ c");
        assert_eq!(escape_text("€5"), "\\2005");
        assert_eq!(escape_text("é"), "\\351");
        assert_eq!(escape_text("日"), "?");
    }
}
