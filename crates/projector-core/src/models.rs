use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::error::CoreError;

/// Textual form of every calendar date crossing the store boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// `YYYY-MM-DD`, as for occurrences.
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceStatus {
    #[default]
    Pending,
    Done,
}

impl OccurrenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OccurrenceStatus::Pending => "pending",
            OccurrenceStatus::Done => "done",
        }
    }
}

impl fmt::Display for OccurrenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid occurrence status: {0}")]
pub struct ParseOccurrenceStatusError(String);

impl FromStr for OccurrenceStatus {
    type Err = ParseOccurrenceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "todo" => Ok(OccurrenceStatus::Pending),
            "done" => Ok(OccurrenceStatus::Done),
            _ => Err(ParseOccurrenceStatusError(s.to_string())),
        }
    }
}

/// Recurrence granularity of an occurrence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RepeatInterval {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RepeatInterval {
    pub const ALL: [RepeatInterval; 6] = [
        RepeatInterval::Minute,
        RepeatInterval::Hour,
        RepeatInterval::Day,
        RepeatInterval::Week,
        RepeatInterval::Month,
        RepeatInterval::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatInterval::Minute => "minute",
            RepeatInterval::Hour => "hour",
            RepeatInterval::Day => "day",
            RepeatInterval::Week => "week",
            RepeatInterval::Month => "month",
            RepeatInterval::Year => "year",
        }
    }
}

impl fmt::Display for RepeatInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid repeat interval: {0} (expected minute, hour, day, week, month or year)")]
pub struct ParseRepeatIntervalError(pub String);

impl FromStr for RepeatInterval {
    type Err = ParseRepeatIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minute" => Ok(RepeatInterval::Minute),
            "hour" => Ok(RepeatInterval::Hour),
            "day" => Ok(RepeatInterval::Day),
            "week" => Ok(RepeatInterval::Week),
            "month" => Ok(RepeatInterval::Month),
            "year" => Ok(RepeatInterval::Year),
            _ => Err(ParseRepeatIntervalError(s.to_string())),
        }
    }
}

/// A stored occurrence, exactly as the store holds it.
///
/// Dates and the interval stay in their textual column form: rows may have been
/// written by older tooling, and a malformed value has to surface as a
/// recurrence error when the chain advances rather than as a failed load.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Occurrence {
    pub id: Uuid,
    pub project_id: Option<Uuid>,
    pub name: String,
    pub note: Option<String>,
    pub due_date: Option<String>,
    pub status: OccurrenceStatus,
    pub repeat_count: u32,
    pub repeat_interval: Option<String>,
    pub repeat_pattern: Option<String>,
    pub repeat_until: Option<String>,
    /// Weak back-reference to the occurrence this one was generated from.
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Occurrence {
    /// Whether completing this occurrence should try to produce a successor.
    pub fn is_recurring(&self) -> bool {
        self.repeat_count > 0
            && self
                .repeat_interval
                .as_deref()
                .is_some_and(|interval| !interval.trim().is_empty())
    }
}

/// Data for a new occurrence, either entered directly or requested by the
/// chain controller for a successor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOccurrenceData {
    pub name: String,
    pub note: Option<String>,
    pub project_name: Option<String>, // Kept for CLI convenience
    pub project_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub status: OccurrenceStatus,
    pub repeat_count: u32,
    pub repeat_interval: Option<RepeatInterval>,
    pub repeat_pattern: Option<String>,
    pub repeat_until: Option<NaiveDate>,
    pub parent_id: Option<Uuid>,
}

/// Listing filter for occurrences.
#[derive(Debug, Clone, Default)]
pub struct OccurrenceFilter {
    pub status: Option<OccurrenceStatus>,
    pub project: Option<String>,
}

/// What happened to the recurrence chain after a completion.
#[derive(Debug)]
pub enum ChainOutcome {
    /// The occurrence had no remaining repeats or no interval.
    NotRecurring,
    /// A successor was inserted.
    Created(Occurrence),
    /// The next due date falls after `repeat_until`; the chain ends here.
    Exhausted { next_due: NaiveDate, until: NaiveDate },
    /// The successor could not be computed or stored. The completion stands.
    Failed(CoreError),
    /// The occurrence was already done; nothing was written.
    AlreadyDone,
}

/// Two-part result of completing an occurrence: the occurrence as it now
/// stands, which is always `done`, and the chain continuation.
#[derive(Debug)]
pub struct CompletionResult {
    pub completed: Occurrence,
    pub chain: ChainOutcome,
}
