use anyhow::{anyhow, Result};
use projector_core::error::CoreError;
use projector_core::repository::Repository;
use uuid::Uuid;

const MIN_SHORT_ID_LENGTH: usize = 2;

/// Length of the ID prefix shown in tables and messages.
pub const SHORT_ID_LENGTH: usize = 8;

pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..SHORT_ID_LENGTH].to_string()
}

pub async fn resolve_occurrence_id(repo: &impl Repository, short_id: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(short_id) {
        return Ok(id);
    }
    if short_id.trim().len() < MIN_SHORT_ID_LENGTH {
        return Err(anyhow!(CoreError::Validation(format!(
            "short ID must be at least {} characters long",
            MIN_SHORT_ID_LENGTH
        ))));
    }
    let occurrences = repo.find_occurrences_by_short_id_prefix(short_id).await?;
    if occurrences.len() == 1 {
        Ok(occurrences[0].id)
    } else if occurrences.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No occurrence found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let occurrence_info: Vec<(String, String)> = occurrences
            .into_iter()
            .map(|o| (o.id.to_string(), o.name))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(occurrence_info)))
    }
}
