use chrono::{Duration, Local, NaiveDate};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use projector_core::models::{Occurrence, OccurrenceStatus, Project};
use projector_core::pattern::{format_weekdays, parse_weekly_pattern};
use projector_core::repository::OccurrenceDetails;
use projector_core::validation::parse_date;
use uuid::Uuid;

use crate::util::short_id;

pub fn display_occurrences(occurrences: &[OccurrenceDetails]) {
    if occurrences.is_empty() {
        println!("No occurrences found.");
        return;
    }

    let today = Local::now().date_naive();
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Status", "Due Date", "Project", "Repeats"]);

    for details in occurrences {
        let occurrence = &details.occurrence;
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&occurrence.id)));
        row.add_cell(name_cell(occurrence));
        row.add_cell(status_cell(occurrence.status));
        row.add_cell(due_cell(occurrence, today));
        row.add_cell(Cell::new(details.project_name.as_deref().unwrap_or("None")));
        row.add_cell(Cell::new(describe_repetition(occurrence)));
        table.add_row(row);
    }

    println!("{table}");
}

/// Prints a predecessor chain, oldest first, marking `current`.
pub fn display_chain(chain: &[Occurrence], current: Uuid) {
    let today = Local::now().date_naive();
    let mut table = Table::new();
    table.set_header(vec!["", "ID", "Status", "Due Date", "Repeats Left"]);

    for occurrence in chain {
        let mut row = Row::new();
        row.add_cell(Cell::new(if occurrence.id == current { "→" } else { "" }));
        row.add_cell(Cell::new(short_id(&occurrence.id)));
        row.add_cell(status_cell(occurrence.status));
        row.add_cell(due_cell(occurrence, today));
        row.add_cell(Cell::new(occurrence.repeat_count));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Due", "Created At"]);

    for project in projects {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&project.id)));
        row.add_cell(Cell::new(&project.name));
        row.add_cell(Cell::new(project.due_date.as_deref().unwrap_or("-")));
        row.add_cell(Cell::new(project.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

/// Human description of how an occurrence repeats, e.g.
/// `"3 more, every week on mon,wed until 2025-06-30"`.
pub fn describe_repetition(occurrence: &Occurrence) -> String {
    if !occurrence.is_recurring() {
        return "None".to_string();
    }

    let interval = occurrence.repeat_interval.as_deref().unwrap_or_default().trim();
    let mut text = format!("{} more, every {}", occurrence.repeat_count, interval);

    if interval.eq_ignore_ascii_case("week") {
        if let Some(pattern) = occurrence.repeat_pattern.as_deref() {
            let days = parse_weekly_pattern(pattern);
            if !days.is_empty() {
                text.push_str(&format!(" on {}", format_weekdays(&days)));
            }
        }
    }

    if let Some(until) = occurrence.repeat_until.as_deref().filter(|u| !u.trim().is_empty()) {
        text.push_str(&format!(" until {}", until));
    }

    text
}

/// `"2025-01-06 (in 5 days)"`, or the raw column text when it is not a date.
pub fn describe_due_date(raw: &str, today: NaiveDate) -> String {
    match parse_date(raw) {
        Ok(due) if due == today => format!("{} (today)", due),
        Ok(due) => format!("{} ({})", due, Duration::days((due - today).num_days()).humanize()),
        Err(_) => raw.to_string(),
    }
}

fn name_cell(occurrence: &Occurrence) -> Cell {
    let mut display_name = String::new();
    if occurrence.is_recurring() {
        display_name.push_str("↻ ");
    }
    display_name.push_str(&occurrence.name);

    let cell = Cell::new(display_name);
    match occurrence.status {
        OccurrenceStatus::Done => cell.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey),
        OccurrenceStatus::Pending => cell,
    }
}

fn status_cell(status: OccurrenceStatus) -> Cell {
    let cell = Cell::new(status);
    match status {
        OccurrenceStatus::Done => cell.fg(Color::Green),
        OccurrenceStatus::Pending => cell,
    }
}

fn due_cell(occurrence: &Occurrence, today: NaiveDate) -> Cell {
    let Some(raw) = occurrence.due_date.as_deref() else {
        return Cell::new("None");
    };

    let cell = Cell::new(describe_due_date(raw, today));
    if occurrence.status == OccurrenceStatus::Done {
        return cell;
    }
    match parse_date(raw) {
        Ok(due) if due < today => cell.fg(Color::Red),
        Ok(due) if due == today => cell.fg(Color::Yellow),
        _ => cell,
    }
}
