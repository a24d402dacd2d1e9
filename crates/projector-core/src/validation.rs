use chrono::NaiveDate;

use crate::error::CoreError;
use crate::models::{NewOccurrenceData, DATE_FORMAT};

pub const MAX_NAME_LENGTH: usize = 255;

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::Validation(format!(
            "invalid date format: '{}'. Expected format: YYYY-MM-DD",
            raw
        ))
    })
}

fn validate_name(kind: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!("{} name is required", kind)));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{} name is too long (max {} characters)",
            kind, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

pub fn validate_occurrence_name(name: &str) -> Result<(), CoreError> {
    validate_name("occurrence", name)
}

pub fn validate_project_name(name: &str) -> Result<(), CoreError> {
    validate_name("project", name)
}

fn validate_due_date(
    due_date: NaiveDate,
    today: NaiveDate,
    allow_past_due: bool,
) -> Result<(), CoreError> {
    if !allow_past_due && due_date < today {
        return Err(CoreError::Validation(format!(
            "due date {} is in the past",
            due_date
        )));
    }
    Ok(())
}

/// Validates a new project. The due date follows the occurrence past-due rule.
pub fn validate_new_project(
    name: &str,
    due_date: Option<NaiveDate>,
    today: NaiveDate,
    allow_past_due: bool,
) -> Result<(), CoreError> {
    validate_project_name(name)?;
    if let Some(due_date) = due_date {
        validate_due_date(due_date, today, allow_past_due)?;
    }
    Ok(())
}

/// Validates an occurrence entered directly by a user.
///
/// Successors produced by the chain only go through
/// [`validate_occurrence_name`]: an overdue chain still has to continue.
pub fn validate_new_occurrence(
    data: &NewOccurrenceData,
    today: NaiveDate,
    allow_past_due: bool,
) -> Result<(), CoreError> {
    validate_occurrence_name(&data.name)?;

    if let Some(due_date) = data.due_date {
        validate_due_date(due_date, today, allow_past_due)?;
        if let Some(until) = data.repeat_until {
            if until < due_date {
                return Err(CoreError::Validation(format!(
                    "repeat until date {} is before the due date {}",
                    until, due_date
                )));
            }
        }
    }

    if data.repeat_count > 0 && data.repeat_interval.is_none() {
        return Err(CoreError::Validation(
            "a repeat count needs a repeat interval".to_string(),
        ));
    }

    Ok(())
}
