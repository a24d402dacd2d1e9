use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use projector_core::models::{NewOccurrenceData, RepeatInterval};
use projector_core::pattern::unrecognized_tokens;
use projector_core::repository::Repository;
use projector_core::validation::parse_date;

use crate::cli::AddCommand;
use crate::parser::parse_due_date;
use crate::util::short_id;
use crate::views::table::describe_repetition;

pub async fn add_occurrence(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let due_date = command.due.as_deref().map(parse_due_date).transpose()?;
    let repeat_until = command.until.as_deref().map(parse_date).transpose()?;

    let warning_style = Style::new().yellow();
    let repeat_pattern = match (&command.on, command.every) {
        (Some(pattern), Some(interval)) => {
            let unknown = unrecognized_tokens(pattern);
            if !unknown.is_empty() {
                eprintln!(
                    "{} ignoring unrecognized weekdays: {}",
                    "Warning:".style(warning_style),
                    unknown.join(", ")
                );
            }
            if interval != RepeatInterval::Week {
                eprintln!(
                    "{} --on only applies to weekly repeats",
                    "Warning:".style(warning_style)
                );
            }
            Some(pattern.clone())
        }
        _ => None,
    };

    let new_occurrence_data = NewOccurrenceData {
        name: command.name,
        note: command.note,
        project_name: command.project,
        due_date,
        repeat_count: command.times.unwrap_or_default(),
        repeat_interval: command.every,
        repeat_pattern,
        repeat_until,
        ..Default::default()
    };

    let added = repo.add_occurrence(new_occurrence_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created occurrence '{}' [{}]",
        "✓".style(success_style),
        added.name.bold(),
        short_id(&added.id)
    );

    if let Some(due) = &added.due_date {
        println!("  {} Due: {}", "→".style(info_style), due);
    }
    if added.is_recurring() {
        println!("  {} Repeats: {}", "→".style(info_style), describe_repetition(&added));
    }

    Ok(())
}
