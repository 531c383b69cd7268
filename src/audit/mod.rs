//! Audit log for spendlog
//!
//! Every expense write and preference change is appended to `audit.log` as
//! one JSON object per line, with the entity state before and after.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
