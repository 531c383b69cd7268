//! CLI commands for recording and browsing expenses

use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use clap::Args;

use crate::config::Settings;
use crate::display::{format_day_list, format_expense_details, format_expense_short, format_expense_table};
use crate::error::{SpendlogError, SpendlogResult};
use crate::models::{local_timestamp_millis, ExpenseCategory, ExpenseId};
use crate::reports::{sections, DaySummary, Grouping};
use crate::services::{DuplicatePolicy, ExpenseForm, ExpenseService, SaveOutcome};
use crate::storage::Storage;

use super::{local_today, parse_date, parse_time};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// What the money was spent on
    pub title: String,

    /// Amount, e.g. 12.50
    pub amount: String,

    /// staff, travel, food or utility
    #[arg(short, long)]
    pub category: ExpenseCategory,

    /// Date (YYYY-MM-DD, today, yesterday); defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Time (HH:MM); defaults to now
    #[arg(short, long)]
    pub time: Option<String>,

    /// Optional note (up to 100 characters)
    #[arg(short, long)]
    pub note: Option<String>,

    /// Path to a receipt image
    #[arg(short, long)]
    pub receipt: Option<String>,

    /// Save even if a same-day duplicate exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Expense ID (e.g. 12 or #12)
    pub id: ExpenseId,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub amount: Option<String>,

    #[arg(short, long)]
    pub category: Option<ExpenseCategory>,

    #[arg(short, long)]
    pub date: Option<String>,

    #[arg(short, long)]
    pub time: Option<String>,

    #[arg(short, long, conflicts_with = "clear_note")]
    pub note: Option<String>,

    /// Remove the note
    #[arg(long)]
    pub clear_note: bool,

    #[arg(short, long)]
    pub receipt: Option<String>,

    /// Save even if a same-day duplicate exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Day to show (YYYY-MM-DD, today, yesterday)
    #[arg(short, long, default_value = "today")]
    pub date: String,

    /// Group by none, category or time
    #[arg(short, long, default_value = "none")]
    pub group: Grouping,

    /// List every stored expense instead of one day
    #[arg(long, conflicts_with = "date")]
    pub all: bool,
}

fn policy(force: bool) -> DuplicatePolicy {
    if force {
        DuplicatePolicy::Allow
    } else {
        DuplicatePolicy::Check
    }
}

fn now_time() -> NaiveTime {
    let now = Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

/// Validate and save, printing the outcome
fn save_form(
    storage: &Storage,
    settings: &Settings,
    form: ExpenseForm,
    policy: DuplicatePolicy,
) -> SpendlogResult<()> {
    let draft = form
        .validate()
        .map_err(|errors| SpendlogError::Validation(errors.to_string()))?;
    let is_edit = draft.is_edit();

    match ExpenseService::new(storage).save(draft, policy)? {
        SaveOutcome::Saved(expense) => {
            let verb = if is_edit { "Updated" } else { "Added" };
            println!("{} {}", verb, format_expense_short(&expense, settings));
            Ok(())
        }
        SaveOutcome::PossibleDuplicate(matches) => {
            eprintln!("Possible duplicate of:");
            for existing in &matches {
                eprintln!("  {}", format_expense_short(existing, settings));
            }
            Err(SpendlogError::Validation(
                "Not saved. Re-run with --force to save anyway".into(),
            ))
        }
    }
}

/// Handle `add`
pub fn handle_add(storage: &Storage, settings: &Settings, args: AddArgs) -> SpendlogResult<()> {
    let date = match &args.date {
        Some(d) => parse_date(d, local_today())?,
        None => local_today(),
    };
    let time = match &args.time {
        Some(t) => parse_time(t)?,
        None => now_time(),
    };

    let form = ExpenseForm {
        id: ExpenseId::UNSAVED,
        title: args.title,
        amount: args.amount,
        category: Some(args.category),
        timestamp: local_timestamp_millis(&Local, date, time),
        note: args.note.unwrap_or_default(),
        receipt: args.receipt,
    };

    save_form(storage, settings, form, policy(args.force))
}

/// Handle `edit`: unspecified fields keep their stored values
pub fn handle_edit(storage: &Storage, settings: &Settings, args: EditArgs) -> SpendlogResult<()> {
    let existing = ExpenseService::new(storage).require(args.id)?;
    let mut form = ExpenseForm::from_expense(&existing);

    if let Some(title) = args.title {
        form.title = title;
    }
    if let Some(amount) = args.amount {
        form.amount = amount;
    }
    if let Some(category) = args.category {
        form.category = Some(category);
    }
    if args.date.is_some() || args.time.is_some() {
        let current = existing.datetime_in(&Local);
        let date: NaiveDate = match &args.date {
            Some(d) => parse_date(d, local_today())?,
            None => current.date_naive(),
        };
        let time = match &args.time {
            Some(t) => parse_time(t)?,
            None => current.time(),
        };
        form.timestamp = local_timestamp_millis(&Local, date, time);
    }
    if let Some(note) = args.note {
        form.note = note;
    }
    if args.clear_note {
        form.note.clear();
    }
    if let Some(receipt) = args.receipt {
        form.receipt = Some(receipt);
    }

    save_form(storage, settings, form, policy(args.force))
}

/// Handle `delete`
pub fn handle_delete(storage: &Storage, settings: &Settings, id: ExpenseId) -> SpendlogResult<()> {
    let removed = ExpenseService::new(storage).delete(id)?;
    println!("Deleted {}", format_expense_short(&removed, settings));
    Ok(())
}

/// Handle `show`
pub fn handle_show(storage: &Storage, settings: &Settings, id: ExpenseId) -> SpendlogResult<()> {
    let expense = ExpenseService::new(storage).require(id)?;
    print!("{}", format_expense_details(&expense, settings));
    Ok(())
}

/// Handle `list`
pub fn handle_list(storage: &Storage, settings: &Settings, args: ListArgs) -> SpendlogResult<()> {
    let service = ExpenseService::new(storage);

    if args.all {
        let expenses = service.list_all()?;
        if expenses.is_empty() {
            println!("No expenses recorded.");
        } else {
            println!("{}", format_expense_table(&expenses, settings, &Local));
        }
        return Ok(());
    }

    let day = parse_date(&args.date, local_today())?;
    let expenses = service.list_for_day(day, &Local)?;
    let summary = DaySummary::new(day, &expenses);
    let grouped = sections(&expenses, args.group, &Local);

    print!("{}", format_day_list(&summary, &grouped, settings, &Local));
    Ok(())
}
