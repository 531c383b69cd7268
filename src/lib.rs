//! spendlog - a personal daily expense tracker
//!
//! Records expenses with a title, amount, category, time and optional note
//! and receipt, warns about likely duplicates, lists a day's spending
//! grouped by category or time of day, and summarizes the last seven days
//! as a report that can be exported to CSV or PDF.
//!
//! # Architecture
//!
//! - `config`: Paths and user settings
//! - `error`: Library error type
//! - `models`: Expenses, money, categories and the theme preference
//! - `storage`: JSON-file stores with live subscriptions
//! - `audit`: Append-only audit log
//! - `services`: Validation, duplicate checks, reports, theme and sync
//! - `reports`: Day grouping and seven-day aggregation
//! - `export`: CSV and PDF rendering
//! - `screens`: UI state machines shared by the TUI
//! - `display`, `cli`, `tui`: Terminal front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use spendlog::config::{paths::SpendlogPaths, settings::Settings};
//! use spendlog::storage::Storage;
//!
//! let paths = SpendlogPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod screens;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{SpendlogError, SpendlogResult};
