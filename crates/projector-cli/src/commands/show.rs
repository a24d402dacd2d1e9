use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use projector_core::error::CoreError;
use projector_core::repository::Repository;

use crate::cli::ShowCommand;
use crate::util::resolve_occurrence_id;
use crate::views::table::{describe_due_date, describe_repetition, display_chain};

pub async fn show_occurrence(repo: &impl Repository, command: ShowCommand) -> Result<()> {
    let occurrence_id = resolve_occurrence_id(repo, &command.id).await?;
    let occurrence = repo
        .find_occurrence_by_id(occurrence_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Occurrence {} not found", occurrence_id)))?;

    let today = Local::now().date_naive();
    println!("{}", occurrence.name.bold());
    println!("  ID:       {}", occurrence.id);
    println!("  Status:   {}", occurrence.status);
    println!(
        "  Due:      {}",
        occurrence
            .due_date
            .as_deref()
            .map(|raw| describe_due_date(raw, today))
            .unwrap_or_else(|| "None".to_string())
    );
    println!("  Repeats:  {}", describe_repetition(&occurrence));
    if let Some(note) = &occurrence.note {
        println!("  Note:     {}", note);
    }

    let chain = repo.find_chain(occurrence.id).await?;
    if chain.len() > 1 {
        println!();
        println!("Chain ({} occurrences):", chain.len());
        display_chain(&chain, occurrence.id);
    }

    Ok(())
}
