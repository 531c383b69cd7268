//! Day list screen

use chrono::{Days, NaiveDate, TimeZone};

use crate::models::{Expense, ExpenseId};
use crate::reports::{sections, DaySummary, Grouping, Section};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMsg {
    SelectDay(NaiveDate),
    PreviousDay,
    NextDay,
    /// Jump to the given date, which the host supplies as "today"
    Today(NaiveDate),
    SetGrouping(Grouping),
    CycleGrouping,
    /// Rows for `day`; ignored if another day has been selected since
    Loaded { day: NaiveDate, expenses: Vec<Expense> },
    LoadFailed { day: NaiveDate, error: String },
    RequestDelete(ExpenseId),
    Deleted(ExpenseId),
    DeleteFailed(String),
    DismissError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCommand {
    /// Start (or restart) watching this day's expenses
    LoadDay(NaiveDate),
    Delete(ExpenseId),
}

/// Expenses of one selected day
#[derive(Debug, Clone)]
pub struct ListScreen<Tz: TimeZone> {
    tz: Tz,
    pub selected_day: NaiveDate,
    pub grouping: Grouping,
    pub expenses: Vec<Expense>,
    pub loading: bool,
    pub deleting: Option<ExpenseId>,
    pub error: Option<String>,
}

impl<Tz: TimeZone> ListScreen<Tz> {
    /// A screen showing `today`; the first load is returned with it
    pub fn new(today: NaiveDate, tz: Tz) -> (Self, ListCommand) {
        let screen = Self {
            tz,
            selected_day: today,
            grouping: Grouping::None,
            expenses: Vec::new(),
            loading: true,
            deleting: None,
            error: None,
        };
        (screen, ListCommand::LoadDay(today))
    }

    pub fn update(&mut self, msg: ListMsg) -> Option<ListCommand> {
        match msg {
            ListMsg::SelectDay(day) | ListMsg::Today(day) => self.select(day),
            ListMsg::PreviousDay => {
                let day = self.selected_day.checked_sub_days(Days::new(1))?;
                self.select(day)
            }
            ListMsg::NextDay => {
                let day = self.selected_day.checked_add_days(Days::new(1))?;
                self.select(day)
            }
            ListMsg::SetGrouping(grouping) => {
                self.grouping = grouping;
                None
            }
            ListMsg::CycleGrouping => {
                self.grouping = self.grouping.next();
                None
            }
            ListMsg::Loaded { day, expenses } => {
                if day == self.selected_day {
                    self.expenses = expenses;
                    self.loading = false;
                    self.error = None;
                }
                None
            }
            ListMsg::LoadFailed { day, error } => {
                if day == self.selected_day {
                    self.loading = false;
                    self.error = Some(error);
                }
                None
            }
            ListMsg::RequestDelete(id) => {
                if self.deleting.is_some() || !self.expenses.iter().any(|e| e.id == id) {
                    return None;
                }
                self.deleting = Some(id);
                Some(ListCommand::Delete(id))
            }
            ListMsg::Deleted(id) => {
                if self.deleting == Some(id) {
                    self.deleting = None;
                }
                // The subscription will re-emit; drop the row right away
                self.expenses.retain(|e| e.id != id);
                None
            }
            ListMsg::DeleteFailed(error) => {
                self.deleting = None;
                self.error = Some(error);
                None
            }
            ListMsg::DismissError => {
                self.error = None;
                None
            }
        }
    }

    fn select(&mut self, day: NaiveDate) -> Option<ListCommand> {
        // Same day: only a failed load is worth re-issuing
        if day == self.selected_day && (self.loading || self.error.is_none()) {
            return None;
        }
        self.selected_day = day;
        self.expenses.clear();
        self.loading = true;
        self.error = None;
        Some(ListCommand::LoadDay(day))
    }

    pub fn summary(&self) -> DaySummary {
        DaySummary::new(self.selected_day, &self.expenses)
    }

    pub fn sections(&self) -> Vec<Section> {
        sections(&self.expenses, self.grouping, &self.tz)
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }
}
