//! Service layer for spendlog
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, duplicate detection, auditing and preferences.

pub mod expense;
pub mod report;
pub mod sync;
pub mod theme;
pub mod validation;

pub use expense::{DuplicatePolicy, ExpenseService, SaveOutcome};
pub use report::{ReportData, ReportService, ReportSource};
pub use sync::{SyncReport, SyncService};
pub use theme::{ThemeService, ThemeSubscription};
pub use validation::{
    validate_amount, validate_category, validate_note, validate_title, ExpenseDraft, ExpenseForm,
    FieldErrors,
};
