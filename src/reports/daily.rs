//! Day view grouping
//!
//! Partitions one day's expenses by category or by part of the day. Every
//! expense lands in exactly one group.

use chrono::{NaiveDate, TimeZone};
use std::fmt;
use std::str::FromStr;

use crate::models::{Expense, ExpenseCategory, Money, TimeOfDay};

/// How the day list is sectioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    #[default]
    None,
    Category,
    TimeOfDay,
}

impl Grouping {
    pub const ALL: [Grouping; 3] = [Self::None, Self::Category, Self::TimeOfDay];

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Category => "Category",
            Self::TimeOfDay => "Time of day",
        }
    }

    /// Cycle to the next grouping mode
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::Category,
            Self::Category => Self::TimeOfDay,
            Self::TimeOfDay => Self::None,
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "category" | "cat" => Ok(Self::Category),
            "time" | "time-of-day" | "time_of_day" => Ok(Self::TimeOfDay),
            other => Err(format!(
                "Unknown grouping '{}'. Choose one of: none, category, time",
                other
            )),
        }
    }
}

/// Expenses sharing one group key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseGroup<K> {
    pub key: K,
    pub expenses: Vec<Expense>,
    pub total: Money,
}

impl<K> ExpenseGroup<K> {
    fn empty(key: K) -> Self {
        Self {
            key,
            expenses: Vec::new(),
            total: Money::zero(),
        }
    }

    fn push(&mut self, expense: &Expense) {
        self.total += expense.amount;
        self.expenses.push(expense.clone());
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// One group per category bucket, in [`ExpenseCategory::ALL`] order
pub fn group_by_category(expenses: &[Expense]) -> Vec<ExpenseGroup<ExpenseCategory>> {
    let mut groups: Vec<_> = ExpenseCategory::ALL
        .iter()
        .map(|c| ExpenseGroup::empty(*c))
        .collect();

    for expense in expenses {
        // ALL covers every variant
        if let Some(group) = groups.iter_mut().find(|g| g.key == expense.category) {
            group.push(expense);
        }
    }
    groups
}

/// One group per part of the day, morning first
pub fn group_by_time_of_day<Tz: TimeZone>(
    expenses: &[Expense],
    tz: &Tz,
) -> Vec<ExpenseGroup<TimeOfDay>> {
    let mut groups: Vec<_> = TimeOfDay::ALL
        .iter()
        .map(|t| ExpenseGroup::empty(*t))
        .collect();

    for expense in expenses {
        let bucket = expense.time_of_day_in(tz);
        if let Some(group) = groups.iter_mut().find(|g| g.key == bucket) {
            group.push(expense);
        }
    }
    groups
}

/// A titled block of the day list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// `None` when the list is not grouped
    pub title: Option<String>,
    pub expenses: Vec<Expense>,
    pub total: Money,
}

fn into_sections<K: fmt::Display>(groups: Vec<ExpenseGroup<K>>) -> Vec<Section> {
    groups
        .into_iter()
        .filter(|g| !g.is_empty())
        .map(|g| Section {
            title: Some(g.key.to_string()),
            expenses: g.expenses,
            total: g.total,
        })
        .collect()
}

/// Section a day's expenses for display, dropping empty groups
pub fn sections<Tz: TimeZone>(expenses: &[Expense], grouping: Grouping, tz: &Tz) -> Vec<Section> {
    match grouping {
        Grouping::None if expenses.is_empty() => Vec::new(),
        Grouping::None => vec![Section {
            title: None,
            expenses: expenses.to_vec(),
            total: expenses.iter().map(|e| e.amount).sum(),
        }],
        Grouping::Category => into_sections(group_by_category(expenses)),
        Grouping::TimeOfDay => into_sections(group_by_time_of_day(expenses, tz)),
    }
}

/// Count and total of one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub count: usize,
    pub total: Money,
}

impl DaySummary {
    pub fn new(date: NaiveDate, expenses: &[Expense]) -> Self {
        Self {
            date,
            count: expenses.len(),
            total: expenses.iter().map(|e| e.amount).sum(),
        }
    }
}
