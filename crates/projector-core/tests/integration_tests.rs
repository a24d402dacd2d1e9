use chrono::NaiveDate;
use projector_core::completion::complete_occurrence;
use projector_core::db::establish_connection;
use projector_core::error::CoreError;
use projector_core::models::*;
use projector_core::repository::{
    OccurrenceRepository, OccurrenceStore, ProjectRepository, RepositoryConfig, SqliteRepository,
};
use tempfile::TempDir;
use uuid::Uuid;

/// Helper function to create a test database
async fn setup_test_db() -> (SqliteRepository, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");

    let pool = establish_connection(&db_path)
        .await
        .expect("Failed to establish test database connection");

    let config = RepositoryConfig {
        allow_past_due: true,
    };
    (SqliteRepository::new(pool, config), temp_dir)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
}

fn weekly(name: &str, due: &str, pattern: &str, count: u32) -> NewOccurrenceData {
    NewOccurrenceData {
        name: name.to_string(),
        note: Some(format!("Notes for {}", name)),
        due_date: Some(date(due)),
        repeat_count: count,
        repeat_interval: Some(RepeatInterval::Week),
        repeat_pattern: Some(pattern.to_string()),
        ..Default::default()
    }
}

fn expect_created(outcome: ChainOutcome) -> Occurrence {
    match outcome {
        ChainOutcome::Created(next) => next,
        other => panic!("Expected a successor, got {:?}", other),
    }
}

#[tokio::test]
async fn test_add_and_find_occurrence() {
    let (repo, _temp_dir) = setup_test_db().await;

    let added = repo
        .add_occurrence(weekly("Standup", "2024-12-30", "mon,wed,fri", 10))
        .await
        .expect("Failed to add occurrence");

    let found = repo
        .find_occurrence_by_id(added.id)
        .await
        .unwrap()
        .expect("Occurrence should exist");

    assert_eq!(found, added);
    assert_eq!(found.status, OccurrenceStatus::Pending);
    assert_eq!(found.due_date.as_deref(), Some("2024-12-30"));
    assert_eq!(found.repeat_interval.as_deref(), Some("week"));
    assert_eq!(found.repeat_pattern.as_deref(), Some("mon,wed,fri"));
    assert_eq!(found.parent_id, None);
}

#[tokio::test]
async fn test_weekly_chain_through_completion() {
    let (repo, _temp_dir) = setup_test_db().await;
    let project = repo.add_project("Team".to_string(), None).await.unwrap();

    let mut data = weekly("Standup", "2024-12-30", "mon,wed,fri", 10);
    data.project_name = Some("Team".to_string());
    let first = repo.add_occurrence(data).await.unwrap();
    assert_eq!(first.project_id, Some(project.id));

    let result = complete_occurrence(&repo, first.id).await.unwrap();
    assert_eq!(result.completed.status, OccurrenceStatus::Done);
    let second = expect_created(result.chain);
    assert_eq!(second.due_date.as_deref(), Some("2025-01-01"));
    assert_eq!(second.repeat_count, 9);
    assert_eq!(second.parent_id, Some(first.id));
    assert_eq!(second.project_id, Some(project.id));
    assert_eq!(second.note, first.note);

    let third = expect_created(complete_occurrence(&repo, second.id).await.unwrap().chain);
    assert_eq!(third.due_date.as_deref(), Some("2025-01-03"));
    assert_eq!(third.repeat_count, 8);

    let fourth = expect_created(complete_occurrence(&repo, third.id).await.unwrap().chain);
    assert_eq!(fourth.due_date.as_deref(), Some("2025-01-06"));
    assert_eq!(fourth.repeat_count, 7);
    assert_eq!(fourth.status, OccurrenceStatus::Pending);

    let stored_first = repo.find_occurrence_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(stored_first.status, OccurrenceStatus::Done);

    let chain = repo.find_chain(fourth.id).await.unwrap();
    let ids: Vec<Uuid> = chain.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id, fourth.id]);
}

#[tokio::test]
async fn test_chain_stops_at_until_boundary() {
    let (repo, _temp_dir) = setup_test_db().await;

    let first = repo
        .add_occurrence(NewOccurrenceData {
            name: "Daily check".to_string(),
            due_date: Some(date("2025-01-01")),
            repeat_count: 10,
            repeat_interval: Some(RepeatInterval::Day),
            repeat_until: Some(date("2025-01-02")),
            ..Default::default()
        })
        .await
        .unwrap();

    // 2025-01-02 equals the bound and is still created.
    let second = expect_created(complete_occurrence(&repo, first.id).await.unwrap().chain);
    assert_eq!(second.due_date.as_deref(), Some("2025-01-02"));
    assert_eq!(second.repeat_until.as_deref(), Some("2025-01-02"));

    let last = complete_occurrence(&repo, second.id).await.unwrap();
    match last.chain {
        ChainOutcome::Exhausted { next_due, until } => {
            assert_eq!(next_due, date("2025-01-03"));
            assert_eq!(until, date("2025-01-02"));
        }
        other => panic!("Expected exhaustion, got {:?}", other),
    }

    let pending = repo
        .find_occurrences(&OccurrenceFilter {
            status: Some(OccurrenceStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn test_chain_stops_when_count_runs_out() {
    let (repo, _temp_dir) = setup_test_db().await;

    let first = repo
        .add_occurrence(NewOccurrenceData {
            name: "Pay invoice".to_string(),
            due_date: Some(date("2025-01-31")),
            repeat_count: 1,
            repeat_interval: Some(RepeatInterval::Month),
            ..Default::default()
        })
        .await
        .unwrap();

    let second = expect_created(complete_occurrence(&repo, first.id).await.unwrap().chain);
    assert_eq!(second.due_date.as_deref(), Some("2025-02-28"));
    assert_eq!(second.repeat_count, 0);

    let last = complete_occurrence(&repo, second.id).await.unwrap();
    assert!(matches!(last.chain, ChainOutcome::NotRecurring));

    let all = repo.find_occurrences(&OccurrenceFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|o| o.occurrence.status == OccurrenceStatus::Done));
}

#[tokio::test]
async fn test_completing_a_done_occurrence_twice() {
    let (repo, _temp_dir) = setup_test_db().await;

    let first = repo
        .add_occurrence(weekly("Gym", "2025-01-06", "mon,thu", 4))
        .await
        .unwrap();

    let created = expect_created(complete_occurrence(&repo, first.id).await.unwrap().chain);
    let again = complete_occurrence(&repo, first.id).await.unwrap();
    assert!(matches!(again.chain, ChainOutcome::AlreadyDone));

    let all = repo.find_occurrences(&OccurrenceFilter::default()).await.unwrap();
    let children: Vec<Uuid> = all
        .iter()
        .filter(|o| o.occurrence.parent_id == Some(first.id))
        .map(|o| o.occurrence.id)
        .collect();
    assert_eq!(children, vec![created.id]);
}

#[tokio::test]
async fn test_complete_unknown_id_is_not_found() {
    let (repo, _temp_dir) = setup_test_db().await;
    let result = complete_occurrence(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_corrupt_interval_does_not_block_completion() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pool = establish_connection(temp_dir.path().join("legacy.db")).await.unwrap();
    let repo = SqliteRepository::new(
        pool.clone(),
        RepositoryConfig {
            allow_past_due: true,
        },
    );

    let occurrence = repo
        .add_occurrence(NewOccurrenceData {
            name: "Legacy row".to_string(),
            due_date: Some(date("2025-01-01")),
            repeat_count: 2,
            repeat_interval: Some(RepeatInterval::Day),
            ..Default::default()
        })
        .await
        .unwrap();

    // Simulate a row written by older tooling.
    sqlx::query("UPDATE occurrences SET repeat_interval = 'fortnight' WHERE id = $1")
        .bind(occurrence.id)
        .execute(&pool)
        .await
        .unwrap();

    let result = complete_occurrence(&repo, occurrence.id).await.unwrap();
    assert!(matches!(
        result.chain,
        ChainOutcome::Failed(CoreError::UnknownInterval(ref raw)) if raw == "fortnight"
    ));

    let stored = repo.find_occurrence_by_id(occurrence.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OccurrenceStatus::Done);
}

#[tokio::test]
async fn test_add_occurrence_validation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pool = establish_connection(temp_dir.path().join("strict.db")).await.unwrap();
    let strict = SqliteRepository::new(pool, RepositoryConfig::default());

    let empty_name = strict
        .add_occurrence(NewOccurrenceData::default())
        .await;
    assert!(matches!(empty_name, Err(CoreError::Validation(_))));

    let past = strict
        .add_occurrence(NewOccurrenceData {
            name: "Yesterday".to_string(),
            due_date: Some(date("2000-01-01")),
            ..Default::default()
        })
        .await;
    assert!(matches!(past, Err(CoreError::Validation(_))));

    let unknown_project = strict
        .add_occurrence(NewOccurrenceData {
            name: "Orphan".to_string(),
            project_name: Some("Nowhere".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(unknown_project, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_insert_occurrence_accepts_past_due_successors() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pool = establish_connection(temp_dir.path().join("strict.db")).await.unwrap();
    let strict = SqliteRepository::new(pool, RepositoryConfig::default());

    let successor = strict
        .insert_occurrence(NewOccurrenceData {
            name: "Overdue chain link".to_string(),
            due_date: Some(date("2000-01-02")),
            repeat_count: 4,
            repeat_interval: Some(RepeatInterval::Day),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(successor.due_date.as_deref(), Some("2000-01-02"));
}

#[tokio::test]
async fn test_update_status_of_missing_row_is_not_found() {
    let (repo, _temp_dir) = setup_test_db().await;
    let result = repo
        .update_occurrence_status(Uuid::new_v4(), OccurrenceStatus::Done)
        .await;
    assert!(matches!(result, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_filtering_and_short_ids() {
    let (repo, _temp_dir) = setup_test_db().await;
    repo.add_project("Home".to_string(), None).await.unwrap();

    let chores = repo
        .add_occurrence(NewOccurrenceData {
            name: "Vacuum".to_string(),
            project_name: Some("Home".to_string()),
            due_date: Some(date("2025-02-01")),
            ..Default::default()
        })
        .await
        .unwrap();
    let errand = repo
        .add_occurrence(NewOccurrenceData {
            name: "Post office".to_string(),
            due_date: Some(date("2025-01-15")),
            ..Default::default()
        })
        .await
        .unwrap();
    complete_occurrence(&repo, errand.id).await.unwrap();

    let home = repo
        .find_occurrences(&OccurrenceFilter {
            project: Some("Home".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(home.len(), 1);
    assert_eq!(home[0].occurrence.id, chores.id);
    assert_eq!(home[0].project_name.as_deref(), Some("Home"));

    let done = repo
        .find_occurrences(&OccurrenceFilter {
            status: Some(OccurrenceStatus::Done),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].occurrence.id, errand.id);

    // Listing is ordered by due date.
    let all = repo.find_occurrences(&OccurrenceFilter::default()).await.unwrap();
    let names: Vec<&str> = all.iter().map(|o| o.occurrence.name.as_str()).collect();
    assert_eq!(names, vec!["Post office", "Vacuum"]);

    let full = chores.id.to_string();
    let by_prefix = repo
        .find_occurrences_by_short_id_prefix(&full[..8])
        .await
        .unwrap();
    assert!(by_prefix.iter().any(|o| o.id == chores.id));

    let by_full_id = repo.find_occurrences_by_short_id_prefix(&full).await.unwrap();
    assert_eq!(by_full_id.len(), 1);

    let nonsense = repo.find_occurrences_by_short_id_prefix("zz%").await.unwrap();
    assert!(nonsense.is_empty());
}

#[tokio::test]
async fn test_deleting_a_predecessor_keeps_the_successor() {
    let (repo, _temp_dir) = setup_test_db().await;

    let first = repo
        .add_occurrence(weekly("Gym", "2025-01-06", "mon", 3))
        .await
        .unwrap();
    let second = expect_created(complete_occurrence(&repo, first.id).await.unwrap().chain);
    assert_eq!(second.due_date.as_deref(), Some("2025-01-13"));

    repo.delete_occurrence(first.id).await.unwrap();

    let orphan = repo.find_occurrence_by_id(second.id).await.unwrap().unwrap();
    assert_eq!(orphan.parent_id, None);
    assert_eq!(repo.find_chain(second.id).await.unwrap().len(), 1);

    assert!(matches!(
        repo.delete_occurrence(first.id).await,
        Err(CoreError::NotFound(_))
    ));
    assert!(matches!(
        repo.find_chain(first.id).await,
        Err(CoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_project_due_date() {
    let (repo, _temp_dir) = setup_test_db().await;

    let dated = repo
        .add_project("Launch".to_string(), Some(date("2025-06-30")))
        .await
        .unwrap();
    assert_eq!(dated.due_date.as_deref(), Some("2025-06-30"));

    repo.add_project("Backlog".to_string(), None).await.unwrap();

    let projects = repo.find_projects().await.unwrap();
    let due_dates: Vec<_> = projects
        .iter()
        .map(|p| (p.name.as_str(), p.due_date.as_deref()))
        .collect();
    assert_eq!(
        due_dates,
        vec![("Backlog", None), ("Launch", Some("2025-06-30"))]
    );

    let found = repo.find_project_by_name("Launch").await.unwrap().unwrap();
    assert_eq!(found.due_date.as_deref(), Some("2025-06-30"));
}

#[tokio::test]
async fn test_project_past_due_date_needs_opt_in() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pool = establish_connection(&temp_dir.path().join("strict.db"))
        .await
        .unwrap();
    let repo = SqliteRepository::new(pool, RepositoryConfig::default());

    assert!(matches!(
        repo.add_project("Late".to_string(), Some(date("2000-01-01"))).await,
        Err(CoreError::Validation(_))
    ));
    assert!(repo.find_projects().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_project_lifecycle() {
    let (repo, _temp_dir) = setup_test_db().await;

    let project = repo.add_project("Garden".to_string(), None).await.unwrap();
    assert_eq!(project.name, "Garden");
    assert!(matches!(
        repo.add_project("Garden".to_string(), None).await,
        Err(CoreError::Validation(_))
    ));

    let occurrence = repo
        .add_occurrence(NewOccurrenceData {
            name: "Mow".to_string(),
            project_id: Some(project.id),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(matches!(
        repo.delete_project("Garden".to_string()).await,
        Err(CoreError::Validation(_))
    ));

    repo.delete_occurrence(occurrence.id).await.unwrap();
    repo.delete_project("Garden".to_string()).await.unwrap();

    assert!(repo.find_projects().await.unwrap().is_empty());
    assert!(matches!(
        repo.delete_project("Garden".to_string()).await,
        Err(CoreError::NotFound(_))
    ));
}
