//! CLI commands for the weekly report and its exports

use clap::Args;
use std::path::PathBuf;

use crate::config::paths::SpendlogPaths;
use crate::config::Settings;
use crate::display::report::format_percentage;
use crate::error::SpendlogResult;
use crate::export::{ExportFormat, ExportService};
use crate::services::{ReportService, ReportSource};
use crate::storage::Storage;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Build the report from sample data
    #[arg(long)]
    pub sample: bool,

    /// Show top N categories only
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Build the export from sample data
    #[arg(long)]
    pub sample: bool,

    /// Write to this path instead of the exports directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn source(flag: bool, settings: &Settings) -> ReportSource {
    ReportSource::from_flag(flag || settings.report.use_sample_data)
}

/// Handle `report`
pub fn handle_report(storage: &Storage, settings: &Settings, args: ReportArgs) -> SpendlogResult<()> {
    let data = ReportService::new(storage).weekly(source(args.sample, settings))?;

    if data.source == ReportSource::Sample {
        println!("(showing {})\n", data.source);
    }

    match args.top {
        Some(limit) => {
            let report = &data.report;
            println!(
                "Top categories, {} to {}",
                report.start_date, report.end_date
            );
            for category in report.top_categories(limit) {
                println!(
                    "  {:<14} {:>12} {:>7}",
                    category.category.label(),
                    category.total.format_with_symbol(&settings.currency_symbol),
                    format_percentage(category.percentage)
                );
            }
        }
        None => print!("{}", data.report.format_terminal(&settings.currency_symbol)),
    }

    Ok(())
}

/// Handle `export`
pub fn handle_export(
    storage: &Storage,
    paths: &SpendlogPaths,
    settings: &Settings,
    args: ExportArgs,
) -> SpendlogResult<()> {
    let data = ReportService::new(storage).weekly(source(args.sample, settings))?;

    let path = ExportService::new(paths, &settings.currency_symbol).export(
        &data,
        args.format,
        args.output.as_deref(),
    )?;

    println!(
        "Exported {} report ({} expenses) to {}",
        args.format,
        data.expenses.len(),
        path.display()
    );
    Ok(())
}
