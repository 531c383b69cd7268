//! Expense entry screen
//!
//! Holds the raw inputs of the entry form. Submitting validates every field;
//! only a fully valid form produces a save command. A possible duplicate
//! parks the form until the user confirms or dismisses it.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::models::{local_timestamp_millis, Expense, ExpenseCategory, ExpenseId};
use crate::services::{DuplicatePolicy, ExpenseDraft, ExpenseForm, FieldErrors, SaveOutcome};

pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
pub const TIME_INPUT_FORMAT: &str = "%H:%M";

/// Text inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Amount,
    Date,
    Time,
    Note,
    Receipt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryMsg {
    /// Blank form dated `now`
    New { now: DateTime<Utc> },
    /// Prefill from a stored expense for editing
    Edit(Expense),
    SetField(EntryField, String),
    SetCategory(ExpenseCategory),
    NextCategory,
    PrevCategory,
    Submit,
    ConfirmDuplicate,
    DismissDuplicate,
    SaveCompleted(SaveOutcome),
    SaveFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryCommand {
    Save {
        draft: ExpenseDraft,
        policy: DuplicatePolicy,
    },
}

/// Entry form state
#[derive(Debug, Clone)]
pub struct EntryScreen<Tz: TimeZone> {
    tz: Tz,
    pub editing: ExpenseId,
    pub title: String,
    pub amount: String,
    pub category: Option<ExpenseCategory>,
    pub date: String,
    pub time: String,
    pub note: String,
    pub receipt: String,
    pub errors: FieldErrors,
    /// Date or time input that did not parse
    pub when_error: Option<String>,
    /// Stored look-alikes awaiting confirmation
    pub duplicates: Vec<Expense>,
    pub saving: bool,
    pub saved: Option<Expense>,
    pub failure: Option<String>,
}

impl<Tz: TimeZone> EntryScreen<Tz> {
    pub fn new(tz: Tz, now: DateTime<Utc>) -> Self {
        let mut screen = Self {
            tz,
            editing: ExpenseId::UNSAVED,
            title: String::new(),
            amount: String::new(),
            category: None,
            date: String::new(),
            time: String::new(),
            note: String::new(),
            receipt: String::new(),
            errors: FieldErrors::default(),
            when_error: None,
            duplicates: Vec::new(),
            saving: false,
            saved: None,
            failure: None,
        };
        screen.reset(now);
        screen
    }

    fn reset(&mut self, now: DateTime<Utc>) {
        let local = now.with_timezone(&self.tz).naive_local();
        self.editing = ExpenseId::UNSAVED;
        self.title.clear();
        self.amount.clear();
        self.category = None;
        self.date = local.format(DATE_INPUT_FORMAT).to_string();
        self.time = local.format(TIME_INPUT_FORMAT).to_string();
        self.note.clear();
        self.receipt.clear();
        self.clear_feedback();
    }

    fn clear_feedback(&mut self) {
        self.errors = FieldErrors::default();
        self.when_error = None;
        self.duplicates.clear();
        self.saving = false;
        self.saved = None;
        self.failure = None;
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_persisted()
    }

    pub fn awaiting_confirmation(&self) -> bool {
        !self.duplicates.is_empty()
    }

    pub fn field(&self, field: EntryField) -> &str {
        match field {
            EntryField::Title => &self.title,
            EntryField::Amount => &self.amount,
            EntryField::Date => &self.date,
            EntryField::Time => &self.time,
            EntryField::Note => &self.note,
            EntryField::Receipt => &self.receipt,
        }
    }

    pub fn update(&mut self, msg: EntryMsg) -> Option<EntryCommand> {
        match msg {
            EntryMsg::New { now } => {
                self.reset(now);
                None
            }
            EntryMsg::Edit(expense) => {
                self.load(&expense);
                None
            }
            EntryMsg::SetField(field, value) => {
                let slot = match field {
                    EntryField::Title => &mut self.title,
                    EntryField::Amount => &mut self.amount,
                    EntryField::Date => &mut self.date,
                    EntryField::Time => &mut self.time,
                    EntryField::Note => &mut self.note,
                    EntryField::Receipt => &mut self.receipt,
                };
                *slot = value;
                // Edits invalidate a pending duplicate warning
                self.duplicates.clear();
                None
            }
            EntryMsg::SetCategory(category) => {
                self.category = Some(category);
                self.duplicates.clear();
                None
            }
            EntryMsg::NextCategory => {
                self.category = Some(
                    self.category
                        .map_or(ExpenseCategory::SELECTABLE[0], |c| c.next()),
                );
                None
            }
            EntryMsg::PrevCategory => {
                self.category = Some(
                    self.category
                        .map_or(ExpenseCategory::SELECTABLE[3], |c| c.prev()),
                );
                None
            }
            EntryMsg::Submit => {
                if self.saving || self.awaiting_confirmation() {
                    return None;
                }
                self.save_command(DuplicatePolicy::Check)
            }
            EntryMsg::ConfirmDuplicate => {
                if self.saving || !self.awaiting_confirmation() {
                    return None;
                }
                self.duplicates.clear();
                self.save_command(DuplicatePolicy::Allow)
            }
            EntryMsg::DismissDuplicate => {
                self.duplicates.clear();
                None
            }
            EntryMsg::SaveCompleted(outcome) => {
                self.saving = false;
                match outcome {
                    SaveOutcome::Saved(expense) => {
                        self.editing = expense.id;
                        self.saved = Some(expense);
                    }
                    SaveOutcome::PossibleDuplicate(matches) => self.duplicates = matches,
                }
                None
            }
            EntryMsg::SaveFailed(error) => {
                self.saving = false;
                self.failure = Some(error);
                None
            }
        }
    }

    fn load(&mut self, expense: &Expense) {
        let local = expense.datetime_in(&self.tz).naive_local();
        self.editing = expense.id;
        self.title = expense.title.clone();
        self.amount = expense.amount.to_decimal_string();
        self.category = Some(expense.category).filter(|c| c.is_selectable());
        self.date = local.format(DATE_INPUT_FORMAT).to_string();
        self.time = local.format(TIME_INPUT_FORMAT).to_string();
        self.note = expense.note.clone().unwrap_or_default();
        self.receipt = expense.receipt.clone().unwrap_or_default();
        self.clear_feedback();
    }

    fn timestamp(&self) -> Result<i64, String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_INPUT_FORMAT)
            .map_err(|_| "Date must look like 2025-03-10".to_string())?;
        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_INPUT_FORMAT)
            .map_err(|_| "Time must look like 14:30".to_string())?;
        Ok(local_timestamp_millis(&self.tz, date, time))
    }

    /// Validate the inputs; all errors are recorded, not just the first
    pub fn validate(&mut self) -> Option<ExpenseDraft> {
        let timestamp = self.timestamp();
        self.when_error = timestamp.as_ref().err().cloned();

        let form = ExpenseForm {
            id: self.editing,
            title: self.title.clone(),
            amount: self.amount.clone(),
            category: self.category,
            timestamp: timestamp.clone().unwrap_or_default(),
            note: self.note.clone(),
            receipt: Some(self.receipt.clone()),
        };

        match form.validate() {
            Ok(draft) => {
                self.errors = FieldErrors::default();
                timestamp.ok().map(|_| draft)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    fn save_command(&mut self, policy: DuplicatePolicy) -> Option<EntryCommand> {
        self.failure = None;
        self.saved = None;
        let draft = self.validate()?;
        self.saving = true;
        Some(EntryCommand::Save { draft, policy })
    }
}
