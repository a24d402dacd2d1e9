use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate};
use chrono_english::{parse_date_string, Dialect};
use projector_core::validation::parse_date;

/// Parses a due date given as `YYYY-MM-DD` or in natural language.
pub fn parse_due_date(date_str: &str) -> Result<NaiveDate> {
    parse_due_date_from(date_str, Local::now())
}

pub fn parse_due_date_from(date_str: &str, now: DateTime<Local>) -> Result<NaiveDate> {
    if let Ok(date) = parse_date(date_str) {
        return Ok(date);
    }
    parse_date_string(date_str, now, Dialect::Us)
        .map(|parsed| parsed.date_naive())
        .map_err(|e| anyhow!("Failed to parse due date '{}': {}", date_str, e))
}
