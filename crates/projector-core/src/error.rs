use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Occurrence is not configured for repetition")]
    UnconfiguredRecurrence,

    #[error("Unknown repeat interval: '{0}'")]
    UnknownInterval(String),

    #[error("Invalid anchor date: {0}")]
    InvalidAnchor(String),

    #[error("Repetition limit reached: next due date {next_due} is after {until}")]
    RecurrenceExhausted { next_due: NaiveDate, until: NaiveDate },

    #[error("Ambiguous short ID. Did you mean one of these?")]
    AmbiguousId(Vec<(String, String)>), // Vec of (ID, Name)
}
