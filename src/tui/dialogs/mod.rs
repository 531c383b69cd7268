//! Modal dialogs

pub mod confirm;
pub mod entry;
