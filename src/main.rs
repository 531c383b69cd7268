use anyhow::Result;
use clap::{Parser, Subcommand};

use spendlog::cli::{
    handle_add, handle_audit, handle_config, handle_delete, handle_edit, handle_export,
    handle_list, handle_report, handle_show, handle_sync, handle_theme, AddArgs, EditArgs,
    ExportArgs, ListArgs, ReportArgs,
};
use spendlog::config::{paths::SpendlogPaths, settings::Settings};
use spendlog::logging::{init_tracing, LogTarget};
use spendlog::models::{ExpenseId, ThemeSetting};
use spendlog::storage::Storage;

#[derive(Parser)]
#[command(
    name = "spendlog",
    author = "Kaylee Beyene",
    version,
    about = "Track daily expenses from the terminal",
    long_about = "spendlog records personal daily expenses, flags likely duplicates, \
                  groups a day's spending by category or time of day and summarizes \
                  the last seven days as a report you can export to CSV or PDF."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Record a new expense
    Add(AddArgs),

    /// Replace fields of a stored expense
    Edit(EditArgs),

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (e.g. 12 or #12)
        id: ExpenseId,
    },

    /// Show one expense in detail
    Show {
        /// Expense ID (e.g. 12 or #12)
        id: ExpenseId,
    },

    /// List a day's expenses
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the seven-day spending report
    Report(ReportArgs),

    /// Export the seven-day report
    Export(ExportArgs),

    /// Show or set the theme (light, dark, system)
    Theme {
        theme: Option<ThemeSetting>,
    },

    /// Run the local mock sync
    Sync,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the settings file with current values
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SpendlogPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let log_file = paths.log_file();
    let target = match cli.command {
        Some(Commands::Tui) => LogTarget::File(&log_file),
        _ => LogTarget::Stderr,
    };
    init_tracing(&settings.log_filter, target);

    // Initialize storage
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Tui) => spendlog::tui::run_tui(&storage, &settings)?,
        Some(Commands::Add(args)) => handle_add(&storage, &settings, args)?,
        Some(Commands::Edit(args)) => handle_edit(&storage, &settings, args)?,
        Some(Commands::Delete { id }) => handle_delete(&storage, &settings, id)?,
        Some(Commands::Show { id }) => handle_show(&storage, &settings, id)?,
        Some(Commands::List(args)) => handle_list(&storage, &settings, args)?,
        Some(Commands::Report(args)) => handle_report(&storage, &settings, args)?,
        Some(Commands::Export(args)) => handle_export(&storage, &paths, &settings, args)?,
        Some(Commands::Theme { theme }) => handle_theme(&storage, theme)?,
        Some(Commands::Sync) => handle_sync(&storage)?,
        Some(Commands::Audit { count }) => handle_audit(&storage, count)?,
        Some(Commands::Config { init }) => handle_config(&paths, &settings, init)?,
        None => {
            println!("spendlog - daily expense tracker");
            println!();
            println!("Run 'spendlog --help' for usage information.");
            println!("Run 'spendlog tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
