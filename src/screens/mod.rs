//! Screen state machines
//!
//! Each screen owns its presentation state and changes it only in
//! `update`, one message at a time. Work that touches storage or the file
//! system is returned as a command for the host to run; the host reports
//! the result back as another message. The TUI is one such host, the tests
//! are another.

pub mod entry;
pub mod list;
pub mod report;
pub mod settings;

pub use entry::{EntryCommand, EntryField, EntryMsg, EntryScreen};
pub use list::{ListCommand, ListMsg, ListScreen};
pub use report::{ReportCommand, ReportMsg, ReportScreen};
pub use settings::{SettingsCommand, SettingsMsg, SettingsScreen};
