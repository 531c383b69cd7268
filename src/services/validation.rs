//! Expense input validation
//!
//! Each field is checked on its own and yields either a value or a message
//! suitable for showing next to the offending input. [`ExpenseForm`] runs
//! every check and collects all failures at once.

use crate::models::{Expense, ExpenseCategory, ExpenseId, Money, MoneyParseError, NOTE_MAX_CHARS};

/// Title must contain something other than whitespace
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title is required".to_string());
    }
    Ok(())
}

/// Amount must parse, be strictly positive and not exceed
/// [`Money::MAX_EXPENSE`]
pub fn validate_amount(amount: &str) -> Result<Money, String> {
    let money = Money::parse(amount).map_err(|e| match e {
        MoneyParseError::Empty => "Amount is required".to_string(),
        MoneyParseError::InvalidFormat(_) => "Amount must be a number, e.g. 12.50".to_string(),
    })?;

    if !money.is_positive() {
        return Err("Amount must be greater than zero".to_string());
    }
    if money > Money::MAX_EXPENSE {
        return Err(format!("Amount cannot exceed {}", Money::MAX_EXPENSE));
    }
    Ok(money)
}

/// A selectable category must be chosen
pub fn validate_category(category: Option<ExpenseCategory>) -> Result<ExpenseCategory, String> {
    match category {
        Some(c) if c.is_selectable() => Ok(c),
        Some(c) => Err(format!("'{}' cannot be chosen for new expenses", c.label())),
        None => Err("Choose a category".to_string()),
    }
}

/// Notes are optional but limited to [`NOTE_MAX_CHARS`] characters
pub fn validate_note(note: Option<&str>) -> Result<(), String> {
    let len = note.map(|n| n.chars().count()).unwrap_or(0);
    if len > NOTE_MAX_CHARS {
        return Err(format!(
            "Note must be at most {} characters ({} entered)",
            NOTE_MAX_CHARS, len
        ));
    }
    Ok(())
}

/// Per-field validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub note: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.note.is_none()
    }

    /// All messages, in form order
    pub fn messages(&self) -> Vec<&str> {
        [&self.title, &self.amount, &self.category, &self.note]
            .into_iter()
            .filter_map(|m| m.as_deref())
            .collect()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

/// Raw user input for an expense, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    /// `ExpenseId::UNSAVED` for a new expense
    pub id: ExpenseId,
    pub title: String,
    pub amount: String,
    pub category: Option<ExpenseCategory>,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub note: String,
    pub receipt: Option<String>,
}

impl ExpenseForm {
    /// Prefill a form from a stored expense for editing
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            title: expense.title.clone(),
            amount: expense.amount.to_decimal_string(),
            category: Some(expense.category),
            timestamp: expense.timestamp,
            note: expense.note.clone().unwrap_or_default(),
            receipt: expense.receipt.clone(),
        }
    }

    /// Run every field check; a draft is produced only if all pass
    pub fn validate(&self) -> Result<ExpenseDraft, FieldErrors> {
        let mut errors = FieldErrors::default();

        errors.title = validate_title(&self.title).err();
        let amount = validate_amount(&self.amount).map_err(|e| errors.amount = Some(e)).ok();
        let category = validate_category(self.category)
            .map_err(|e| errors.category = Some(e))
            .ok();
        errors.note = validate_note(Some(&self.note)).err();

        match (amount, category) {
            (Some(amount), Some(category)) if errors.is_empty() => {
                let note = self.note.trim();
                let receipt = self
                    .receipt
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty());

                let mut expense = Expense::new(self.title.trim(), amount, category, self.timestamp);
                expense.id = self.id;
                expense.note = (!note.is_empty()).then(|| note.to_string());
                expense.receipt = receipt.map(str::to_string);
                Ok(ExpenseDraft { expense })
            }
            _ => Err(errors),
        }
    }
}

/// An expense whose fields have passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    expense: Expense,
}

impl ExpenseDraft {
    pub fn expense(&self) -> &Expense {
        &self.expense
    }

    pub fn into_expense(self) -> Expense {
        self.expense
    }

    pub fn is_edit(&self) -> bool {
        self.expense.is_persisted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ExpenseForm {
        ExpenseForm {
            title: "  Lunch ".into(),
            amount: "12.50".into(),
            category: Some(ExpenseCategory::Food),
            timestamp: 1_700_000_000_000,
            note: "   ".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_titles_rejected() {
        for title in ["", " ", "\t\n"] {
            assert!(validate_title(title).is_err());
        }
        assert!(validate_title("Taxi").is_ok());
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        for amount in ["0", "0.00", "-1", "-0.01", "$-3"] {
            let err = validate_amount(amount).unwrap_err();
            assert!(!err.is_empty(), "{amount}");
        }
        assert_eq!(validate_amount("abc").unwrap_err(), "Amount must be a number, e.g. 12.50");
        assert_eq!(validate_amount("").unwrap_err(), "Amount is required");
        assert_eq!(validate_amount("$0.01").unwrap(), Money::from_cents(1));
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        assert_eq!(validate_amount("1000000000").unwrap(), Money::MAX_EXPENSE);
        assert_eq!(
            validate_amount("1000000000.01").unwrap_err(),
            "Amount cannot exceed $1000000000.00"
        );
        assert!(validate_amount("90000000000000000").is_err());
    }

    #[test]
    fn test_category_must_be_selectable() {
        assert!(validate_category(None).is_err());
        assert!(validate_category(Some(ExpenseCategory::Other)).is_err());
        assert_eq!(
            validate_category(Some(ExpenseCategory::Staff)),
            Ok(ExpenseCategory::Staff)
        );
    }

    #[test]
    fn test_note_length_limit() {
        let at_limit = "a".repeat(NOTE_MAX_CHARS);
        let over = "a".repeat(NOTE_MAX_CHARS + 1);
        assert!(validate_note(None).is_ok());
        assert!(validate_note(Some(&at_limit)).is_ok());
        assert!(validate_note(Some(&over)).is_err());

        // Counted in characters, not bytes
        let accented = "é".repeat(NOTE_MAX_CHARS);
        assert!(validate_note(Some(&accented)).is_ok());
    }

    #[test]
    fn test_form_produces_trimmed_draft() {
        let draft = valid_form().validate().unwrap();
        let expense = draft.expense();
        assert_eq!(expense.title, "Lunch");
        assert_eq!(expense.amount, Money::from_cents(1250));
        assert_eq!(expense.note, None);
        assert!(!draft.is_edit());
    }

    #[test]
    fn test_form_collects_every_error() {
        let form = ExpenseForm {
            title: " ".into(),
            amount: "-5".into(),
            category: None,
            note: "x".repeat(101),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.title.is_some());
        assert!(errors.amount.is_some());
        assert!(errors.category.is_some());
        assert!(errors.note.is_some());
        assert_eq!(errors.messages().len(), 4);
    }

    #[test]
    fn test_single_bad_field_blocks_draft() {
        let mut form = valid_form();
        form.amount = "0".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.messages(), vec!["Amount must be greater than zero"]);
    }

    #[test]
    fn test_edit_form_keeps_id() {
        let mut stored = Expense::new("Taxi", Money::from_cents(1800), ExpenseCategory::Travel, 5)
            .with_note("airport");
        stored.id = ExpenseId::new(3);

        let form = ExpenseForm::from_expense(&stored);
        assert_eq!(form.amount, "18.00");

        let draft = form.validate().unwrap();
        assert!(draft.is_edit());
        assert_eq!(draft.into_expense(), stored);
    }
}
