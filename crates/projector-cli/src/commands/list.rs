use anyhow::Result;
use projector_core::models::OccurrenceFilter;
use projector_core::repository::Repository;

use crate::cli::ListCommand;
use crate::views::table::display_occurrences;

pub async fn list_occurrences(repo: &impl Repository, command: ListCommand) -> Result<()> {
    let filter = OccurrenceFilter {
        status: command.status,
        project: command.project,
    };

    let occurrences = repo.find_occurrences(&filter).await?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&occurrences)?);
    } else {
        display_occurrences(&occurrences);
    }

    Ok(())
}
