use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::warn;

use crate::error::CoreError;
use crate::models::{NewOccurrenceData, Occurrence, OccurrenceStatus, RepeatInterval};
use crate::pattern::parse_weekly_pattern;
use crate::recurrence::{next_due_date, resolve_anchor};
use crate::validation::parse_date;

/// Decides whether `occurrence` gets a successor and with which values.
///
/// # Returns
/// * `Ok(NewOccurrenceData)` - the successor to insert: same descriptive
///   fields and recurrence settings, the next due date, `pending` status, one
///   fewer repeat and `parent_id` pointing back at `occurrence`
///
/// # Errors
/// * [`CoreError::UnconfiguredRecurrence`] - no repeats left or no interval
/// * [`CoreError::UnknownInterval`] - interval outside the six known kinds
/// * [`CoreError::InvalidAnchor`] - due date missing or unparseable
/// * [`CoreError::RecurrenceExhausted`] - next due date is after `repeat_until`
/// * [`CoreError::Validation`] - date overflow
///
/// The until bound is inclusive: a next due date equal to `repeat_until`
/// still produces a successor. A `repeat_until` that is not a `YYYY-MM-DD`
/// date is ignored and dropped from the successor. Nothing is written; the
/// caller owns the insert.
pub fn advance(occurrence: &Occurrence) -> Result<NewOccurrenceData, CoreError> {
    let interval = configured_interval(occurrence)?;

    let weekdays = match (interval, occurrence.repeat_pattern.as_deref()) {
        (RepeatInterval::Week, Some(pattern)) => parse_weekly_pattern(pattern),
        _ => BTreeSet::new(),
    };

    let anchor = resolve_anchor(occurrence.due_date.as_deref())?;
    // Only the date survives into the stored successor; minute and hour
    // recurrences therefore keep the anchor's date.
    let next_due = next_due_date(anchor, interval, &weekdays)?.date();

    let until = repeat_bound(occurrence);

    if let Some(until) = until {
        if next_due > until {
            return Err(CoreError::RecurrenceExhausted { next_due, until });
        }
    }

    Ok(NewOccurrenceData {
        name: occurrence.name.clone(),
        note: occurrence.note.clone(),
        project_name: None,
        project_id: occurrence.project_id,
        due_date: Some(next_due),
        status: OccurrenceStatus::Pending,
        repeat_count: occurrence.repeat_count - 1,
        repeat_interval: Some(interval),
        repeat_pattern: occurrence.repeat_pattern.clone(),
        repeat_until: until,
        parent_id: Some(occurrence.id),
    })
}

/// The inclusive until bound. Blank or unparseable values leave the chain
/// unbounded.
fn repeat_bound(occurrence: &Occurrence) -> Option<NaiveDate> {
    let raw = occurrence
        .repeat_until
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())?;

    match parse_date(raw) {
        Ok(until) => Some(until),
        Err(e) => {
            warn!(
                occurrence = %occurrence.id,
                repeat_until = raw,
                error = %e,
                "ignoring unparseable repeat limit"
            );
            None
        }
    }
}

fn configured_interval(occurrence: &Occurrence) -> Result<RepeatInterval, CoreError> {
    if occurrence.repeat_count == 0 {
        return Err(CoreError::UnconfiguredRecurrence);
    }

    match occurrence.repeat_interval.as_deref().map(str::trim) {
        None | Some("") => Err(CoreError::UnconfiguredRecurrence),
        Some(raw) => raw
            .parse()
            .map_err(|_| CoreError::UnknownInterval(raw.to_string())),
    }
}
