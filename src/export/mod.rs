//! Export module for spendlog
//!
//! Renders the weekly report to CSV or PDF and writes the file into the
//! app-private exports directory, from where it can be shared.

pub mod csv;
pub mod pdf;

pub use self::csv::{export_expenses_csv, CSV_HEADER};
pub use self::pdf::export_report_pdf;

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::paths::SpendlogPaths;
use crate::error::SpendlogResult;
use crate::services::ReportData;
use crate::storage::write_bytes_atomic;

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "CSV"),
            Self::Pdf => write!(f, "PDF"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("Unknown export format '{}'. Use csv or pdf", other)),
        }
    }
}

/// Render report data to bytes in the given format
pub fn render<Tz>(data: &ReportData, format: ExportFormat, currency: &str, tz: &Tz) -> SpendlogResult<Vec<u8>>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut buffer = Vec::new();
    match format {
        ExportFormat::Csv => export_expenses_csv(&data.expenses, tz, &mut buffer)?,
        ExportFormat::Pdf => {
            export_report_pdf(&data.report, &data.expenses, currency, tz, &mut buffer)?
        }
    }
    Ok(buffer)
}

/// Default file name for an export created at `now`
pub fn export_file_name(format: ExportFormat, now: DateTime<Utc>) -> String {
    format!(
        "spendlog-report-{}.{}",
        now.format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}

/// Writes exports into the exports directory
pub struct ExportService<'a> {
    paths: &'a SpendlogPaths,
    currency: &'a str,
}

impl<'a> ExportService<'a> {
    pub fn new(paths: &'a SpendlogPaths, currency: &'a str) -> Self {
        Self { paths, currency }
    }

    /// Export using the local time zone and the current time
    pub fn export(
        &self,
        data: &ReportData,
        format: ExportFormat,
        output: Option<&Path>,
    ) -> SpendlogResult<PathBuf> {
        self.export_in(data, format, output, &Local, Utc::now())
    }

    /// Write the export and return its path; without `output` the file goes
    /// into the exports directory under a timestamped name
    pub fn export_in<Tz>(
        &self,
        data: &ReportData,
        format: ExportFormat,
        output: Option<&Path>,
        tz: &Tz,
        now: DateTime<Utc>,
    ) -> SpendlogResult<PathBuf>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let bytes = render(data, format, self.currency, tz)?;

        let path = match output {
            Some(path) => path.to_path_buf(),
            None => self.paths.exports_dir().join(export_file_name(format, now)),
        };
        write_bytes_atomic(&path, &bytes)?;

        tracing::info!(path = %path.display(), %format, bytes = bytes.len(), "export written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseCategory, Money};
    use crate::reports::WeeklyReport;
    use crate::services::ReportSource;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn data() -> ReportData {
        let expenses = vec![Expense::new("Fuel", Money::from_cents(6000), ExpenseCategory::Travel, 0)];
        let today = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        ReportData {
            source: ReportSource::Stored,
            report: WeeklyReport::generate(&expenses, today, &Utc),
            expenses,
        }
    }

    #[test]
    fn test_export_into_exports_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let service = ExportService::new(&paths, "$");
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 14, 5, 9).unwrap();

        let csv_path = service
            .export_in(&data(), ExportFormat::Csv, None, &Utc, now)
            .unwrap();
        assert_eq!(
            csv_path,
            paths.exports_dir().join("spendlog-report-20250310-140509.csv")
        );
        let contents = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(contents.lines().count(), 2);

        let pdf_path = service
            .export_in(&data(), ExportFormat::Pdf, None, &Utc, now)
            .unwrap();
        assert!(std::fs::read(pdf_path).unwrap().starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn test_export_to_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendlogPaths::with_base_dir(temp_dir.path().to_path_buf());
        let target = temp_dir.path().join("out").join("week.csv");

        let written = ExportService::new(&paths, "$")
            .export_in(&data(), ExportFormat::Csv, Some(&target), &Utc, Utc::now())
            .unwrap();
        assert_eq!(written, target);
        assert!(target.exists());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("PDF".parse::<ExportFormat>(), Ok(ExportFormat::Pdf));
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
