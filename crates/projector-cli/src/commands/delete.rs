use anyhow::Result;
use dialoguer::Confirm;
use projector_core::error::CoreError;
use projector_core::repository::Repository;

use crate::cli::DeleteCommand;
use crate::util::resolve_occurrence_id;

pub async fn delete_occurrence(repo: &impl Repository, command: DeleteCommand) -> Result<()> {
    let occurrence_id = resolve_occurrence_id(repo, &command.id).await?;
    let occurrence = repo
        .find_occurrence_by_id(occurrence_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Occurrence {} not found", occurrence_id)))?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete occurrence '{}'?",
                occurrence.name
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_occurrence(occurrence_id).await?;
    println!("Deleted occurrence: '{}'", occurrence.name);
    Ok(())
}
