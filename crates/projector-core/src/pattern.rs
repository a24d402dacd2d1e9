use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;
use tracing::debug;

/// Day of the week counted from Sunday = 0 through Saturday = 6.
pub type WeekdayIndex = u32;

/// Short names indexed by [`WeekdayIndex`].
const SHORT_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Token table for weekly patterns. Built once and never mutated.
static WEEKDAY_TABLE: OnceLock<HashMap<&'static str, WeekdayIndex>> = OnceLock::new();

fn weekday_table() -> &'static HashMap<&'static str, WeekdayIndex> {
    WEEKDAY_TABLE.get_or_init(|| {
        HashMap::from([
            ("sunday", 0),
            ("sun", 0),
            ("su", 0),
            ("u", 0),
            ("monday", 1),
            ("mon", 1),
            ("m", 1),
            ("tuesday", 2),
            ("tue", 2),
            ("tu", 2),
            // `t` is Tuesday and `r` is Thursday.
            ("t", 2),
            ("wednesday", 3),
            ("wed", 3),
            ("w", 3),
            ("thursday", 4),
            ("thu", 4),
            ("th", 4),
            ("r", 4),
            ("friday", 5),
            ("fri", 5),
            ("f", 5),
            ("saturday", 6),
            ("sat", 6),
            ("sa", 6),
            ("s", 6),
        ])
    })
}

/// Normalized, non-empty tokens of a comma separated pattern.
fn tokens(pattern: &str) -> impl Iterator<Item = String> + '_ {
    pattern
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
}

/// Parses a weekly pattern such as `"mon,wed,fri"` or `"Tuesday, Thursday"`
/// into ascending, de-duplicated weekday indices.
///
/// Unknown tokens are dropped without an error; see [`unrecognized_tokens`]
/// for callers that want to tell the user about them.
pub fn parse_weekly_pattern(pattern: &str) -> BTreeSet<WeekdayIndex> {
    let table = weekday_table();
    let mut days = BTreeSet::new();

    for token in tokens(pattern) {
        match table.get(token.as_str()) {
            Some(&day) => {
                days.insert(day);
            }
            None => debug!(token = %token, pattern, "ignoring unrecognized weekday token"),
        }
    }

    days
}

/// Tokens of `pattern` that [`parse_weekly_pattern`] would silently drop.
pub fn unrecognized_tokens(pattern: &str) -> Vec<String> {
    let table = weekday_table();
    tokens(pattern)
        .filter(|token| !table.contains_key(token.as_str()))
        .collect()
}

/// Weekday index of a calendar date.
pub fn weekday_index(date: NaiveDate) -> WeekdayIndex {
    date.weekday().num_days_from_sunday()
}

/// Canonical rendering of a weekday set, e.g. `"mon,wed,fri"`.
pub fn format_weekdays(days: &BTreeSet<WeekdayIndex>) -> String {
    days.iter()
        .filter_map(|&day| SHORT_NAMES.get(day as usize))
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}
