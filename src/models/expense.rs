//! Expense model
//!
//! A single recorded spending event. Expenses are only ever replaced as a
//! whole; there are no partial updates.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// Maximum number of characters allowed in an expense note
pub const NOTE_MAX_CHARS: usize = 100;

/// Part of the day an expense was made in, derived from its hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// 00:00 - 11:59
    Morning,
    /// 12:00 - 16:59
    Afternoon,
    /// 17:00 - 23:59
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    /// Bucket an hour of the day (0-23)
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned id; `ExpenseId::UNSAVED` until persisted
    #[serde(default)]
    pub id: ExpenseId,

    pub title: String,

    /// Always positive for stored expenses
    pub amount: Money,

    pub category: ExpenseCategory,

    /// Epoch milliseconds
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Path or URI of a receipt image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl Expense {
    /// Create a new, unsaved expense
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        category: ExpenseCategory,
        timestamp: i64,
    ) -> Self {
        Self {
            id: ExpenseId::UNSAVED,
            title: title.into(),
            amount,
            category,
            timestamp,
            note: None,
            receipt: None,
        }
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Attach a receipt path
    pub fn with_receipt(mut self, receipt: impl Into<String>) -> Self {
        self.receipt = Some(receipt.into());
        self
    }

    /// Whether this expense has been stored
    pub fn is_persisted(&self) -> bool {
        self.id.is_persisted()
    }

    /// The timestamp as a UTC date-time (out-of-range values clamp to the epoch)
    pub fn utc_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or_default()
    }

    /// The timestamp in the given time zone
    pub fn datetime_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.utc_datetime().with_timezone(tz)
    }

    /// Calendar day of the expense in the given time zone
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.datetime_in(tz).date_naive()
    }

    /// Hour of day (0-23) in the given time zone
    pub fn hour_in<Tz: TimeZone>(&self, tz: &Tz) -> u32 {
        self.datetime_in(tz).hour()
    }

    /// Time-of-day bucket in the given time zone
    pub fn time_of_day_in<Tz: TimeZone>(&self, tz: &Tz) -> TimeOfDay {
        TimeOfDay::from_hour(self.hour_in(tz))
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.utc_datetime().format("%Y-%m-%d"),
            self.title,
            self.amount,
            self.category
        )
    }
}

/// Epoch milliseconds of a local date and time in the given time zone
///
/// Times that fall into a DST gap resolve to the earliest valid instant after
/// the gap.
pub fn local_timestamp_millis<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> i64 {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => {
            let shifted = naive + chrono::Duration::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.timestamp_millis())
                .unwrap_or_else(|| naive.and_utc().timestamp_millis())
        }
    }
}

/// Half-open `[start, end)` millisecond range covering one local calendar day
pub fn local_day_range<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> (i64, i64) {
    let start = local_timestamp_millis(tz, date, NaiveTime::MIN);
    let next = date.succ_opt().unwrap_or(date);
    let end = local_timestamp_millis(tz, next, NaiveTime::MIN);
    (start, end)
}
