use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use projector_core::completion::complete_occurrence;
use projector_core::models::ChainOutcome;
use projector_core::repository::Repository;

use crate::cli::DoCommand;
use crate::util::{resolve_occurrence_id, short_id};

pub async fn do_occurrence(repo: &impl Repository, command: DoCommand) -> Result<()> {
    let occurrence_id = resolve_occurrence_id(repo, &command.id).await?;
    let result = complete_occurrence(repo, occurrence_id).await?;

    if matches!(result.chain, ChainOutcome::AlreadyDone) {
        println!("Occurrence '{}' is already done.", result.completed.name);
        return Ok(());
    }

    println!("Completed occurrence: '{}'", result.completed.name);

    // The completion stands whatever happens to the chain.
    match result.chain {
        ChainOutcome::NotRecurring | ChainOutcome::AlreadyDone => {}
        ChainOutcome::Created(next) => {
            let due = next.due_date.as_deref().unwrap_or("no due date");
            println!(
                "Created next occurrence '{}' [{}] due {} ({} repeat(s) left)",
                next.name,
                short_id(&next.id),
                due,
                next.repeat_count
            );
        }
        ChainOutcome::Exhausted { next_due, until } => {
            println!(
                "Repetition finished: next due date {} would be after {}",
                next_due, until
            );
        }
        ChainOutcome::Failed(e) => {
            let warning_style = Style::new().yellow().bold();
            eprintln!(
                "{} could not create the next occurrence: {}",
                "Warning:".style(warning_style),
                e
            );
        }
    }

    Ok(())
}
