use chrono::{Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::models::{RepeatInterval, DATE_FORMAT};
use crate::pattern::{weekday_index, WeekdayIndex};

/// Resolves the stored due date of an occurrence into a recurrence anchor.
///
/// Fails with [`CoreError::InvalidAnchor`] when the date is missing, blank or
/// not in `YYYY-MM-DD` form.
pub fn resolve_anchor(due_date: Option<&str>) -> Result<NaiveDate, CoreError> {
    let raw = due_date
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| CoreError::InvalidAnchor("no current due date".to_string()))?;

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| CoreError::InvalidAnchor(format!("'{}': {}", raw, e)))
}

/// Calculates the next due date after `anchor`.
///
/// The anchor is a calendar date and is taken at midnight. `Minute` and `Hour`
/// add a fixed duration to that instant; every other interval is calendar
/// arithmetic. Months and years clamp to the last valid day of the target
/// month, so `2024-01-31` plus a month is `2024-02-29`.
///
/// For `Week`, `weekdays` selects the days the chain may land on. An empty set
/// repeats on the anchor's own weekday seven days later.
pub fn next_due_date(
    anchor: NaiveDate,
    interval: RepeatInterval,
    weekdays: &BTreeSet<WeekdayIndex>,
) -> Result<NaiveDateTime, CoreError> {
    let start = anchor.and_time(NaiveTime::MIN);

    let next = match interval {
        RepeatInterval::Minute => start.checked_add_signed(Duration::minutes(1)),
        RepeatInterval::Hour => start.checked_add_signed(Duration::hours(1)),
        RepeatInterval::Day => anchor.checked_add_days(Days::new(1)).map(at_midnight),
        RepeatInterval::Week => next_weekly_date(anchor, weekdays).map(at_midnight),
        RepeatInterval::Month => anchor.checked_add_months(Months::new(1)).map(at_midnight),
        RepeatInterval::Year => anchor.checked_add_months(Months::new(12)).map(at_midnight),
    };

    next.ok_or_else(|| {
        CoreError::Validation(format!(
            "next {} after {} is outside the supported calendar range",
            interval, anchor
        ))
    })
}

fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Next weekly date: the first configured day later in the anchor's week, or
/// else the earliest configured day of the following week.
fn next_weekly_date(anchor: NaiveDate, weekdays: &BTreeSet<WeekdayIndex>) -> Option<NaiveDate> {
    let Some(&first_day) = weekdays.first() else {
        return anchor.checked_add_days(Days::new(7));
    };

    let current = weekday_index(anchor);
    if let Some(&later) = weekdays.range(current + 1..).next() {
        return anchor.checked_add_days(Days::new(u64::from(later - current)));
    }

    // Every configured day is on or before the anchor's weekday, so the
    // earliest one sits `current - first_day` days before the same weekday
    // next week.
    let next_week = anchor.checked_add_days(Days::new(7))?;
    next_week.checked_sub_days(Days::new(u64::from(current - first_day)))
}
