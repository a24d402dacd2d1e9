use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chain;
use crate::error::CoreError;
use crate::models::{ChainOutcome, CompletionResult, Occurrence, OccurrenceStatus};
use crate::repository::OccurrenceStore;

/// Marks an occurrence done and continues its recurrence chain.
///
/// The status write happens first and is never rolled back. Computing and
/// inserting the successor is best-effort: failures are logged and reported
/// in [`CompletionResult::chain`], never as an `Err`. The steps do not share a
/// transaction, so a crash between the status write and the insert leaves
/// the occurrence done with no successor.
///
/// Completing an occurrence that is already `done` writes nothing and reports
/// [`ChainOutcome::AlreadyDone`].
///
/// # Errors
/// * [`CoreError::NotFound`] - no occurrence with this id
/// * store errors from the initial read or the status write
pub async fn complete_occurrence<S>(store: &S, id: Uuid) -> Result<CompletionResult, CoreError>
where
    S: OccurrenceStore + ?Sized,
{
    let snapshot = store
        .find_occurrence_by_id(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Occurrence {} not found", id)))?;

    // `done` is terminal: completing again must not fork the chain.
    if snapshot.status == OccurrenceStatus::Done {
        debug!(occurrence = %id, "occurrence already done");
        return Ok(CompletionResult {
            completed: snapshot,
            chain: ChainOutcome::AlreadyDone,
        });
    }

    store
        .update_occurrence_status(id, OccurrenceStatus::Done)
        .await?;

    let chain = continue_chain(store, &snapshot).await;

    let mut completed = snapshot;
    completed.status = OccurrenceStatus::Done;
    Ok(CompletionResult { completed, chain })
}

/// Runs the chain controller on the pre-completion snapshot and inserts the
/// successor it asks for.
async fn continue_chain<S>(store: &S, snapshot: &Occurrence) -> ChainOutcome
where
    S: OccurrenceStore + ?Sized,
{
    let request = match chain::advance(snapshot) {
        Ok(request) => request,
        Err(CoreError::UnconfiguredRecurrence) => {
            debug!(occurrence = %snapshot.id, "occurrence does not repeat");
            return ChainOutcome::NotRecurring;
        }
        Err(CoreError::RecurrenceExhausted { next_due, until }) => {
            info!(
                occurrence = %snapshot.id,
                %next_due,
                %until,
                "recurrence finished: next due date is past the repeat limit"
            );
            return ChainOutcome::Exhausted { next_due, until };
        }
        Err(e) => {
            warn!(occurrence = %snapshot.id, error = %e, "failed to compute next repeated occurrence");
            return ChainOutcome::Failed(e);
        }
    };

    match store.insert_occurrence(request).await {
        Ok(next) => {
            info!(
                occurrence = %snapshot.id,
                next = %next.id,
                due_date = next.due_date.as_deref().unwrap_or_default(),
                repeats_left = next.repeat_count,
                "created next repeated occurrence"
            );
            ChainOutcome::Created(next)
        }
        Err(e) => {
            warn!(occurrence = %snapshot.id, error = %e, "failed to create next repeated occurrence");
            ChainOutcome::Failed(e)
        }
    }
}
