//! Terminal user interface
//!
//! A `ratatui` front end over the screen state machines: tabs for the day
//! list, the weekly report and settings, a modal entry form, and toast
//! notifications. Colours follow the stored theme preference.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
