//! CLI commands for preferences, sync, the audit log and configuration

use crate::config::paths::SpendlogPaths;
use crate::config::Settings;
use crate::error::SpendlogResult;
use crate::models::ThemeSetting;
use crate::services::{SyncService, ThemeService};
use crate::storage::Storage;

/// Handle `theme`: show the theme, or set it when one is given
pub fn handle_theme(storage: &Storage, theme: Option<ThemeSetting>) -> SpendlogResult<()> {
    let service = ThemeService::new(storage);

    match theme {
        Some(theme) => {
            let previous = service.set(theme)?;
            if previous == theme {
                println!("Theme is already {}", theme);
            } else {
                println!("Theme changed from {} to {}", previous, theme);
            }
        }
        None => println!("Theme: {}", service.current()?),
    }
    Ok(())
}

/// Handle `sync`
pub fn handle_sync(storage: &Storage) -> SpendlogResult<()> {
    let report = SyncService::new(storage).sync()?;

    println!("Sync complete (local only, nothing was uploaded)");
    println!("  Expenses:     {}", report.expense_count);
    println!("  Synced at:    {}", report.synced_at.format("%Y-%m-%d %H:%M:%S UTC"));
    match report.previous_sync {
        Some(previous) => println!("  Previous:     {}", previous.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  Previous:     never"),
    }
    Ok(())
}

/// Handle `audit`
pub fn handle_audit(storage: &Storage, count: usize) -> SpendlogResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}

/// Handle `config`
pub fn handle_config(paths: &SpendlogPaths, settings: &Settings, init: bool) -> SpendlogResult<()> {
    if init {
        paths.ensure_directories()?;
        settings.save(paths)?;
        println!("Wrote {}", paths.settings_file().display());
        println!();
    }

    println!("spendlog Configuration");
    println!("======================");
    println!("Base directory:    {}", paths.base_dir().display());
    println!("Expenses:          {}", paths.expenses_file().display());
    println!("Preferences:       {}", paths.preferences_file().display());
    println!("Exports:           {}", paths.exports_dir().display());
    println!("Audit log:         {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Time format:     {}", settings.time_format);
    println!("  Sample report:   {}", settings.report.use_sample_data);
    println!("  Log filter:      {}", settings.log_filter);
    Ok(())
}
