use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    NewOccurrenceData, Occurrence, OccurrenceFilter, OccurrenceStatus, Project,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub mod occurrences;
pub mod projects;

/// An occurrence joined with the name of its project, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OccurrenceDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub occurrence: Occurrence,
    pub project_name: Option<String>,
}

/// The three store operations the completion workflow relies on.
#[async_trait]
pub trait OccurrenceStore {
    async fn find_occurrence_by_id(&self, id: Uuid) -> Result<Option<Occurrence>, CoreError>;
    /// Fails with [`CoreError::NotFound`] when no row has this id.
    async fn update_occurrence_status(&self, id: Uuid, status: OccurrenceStatus) -> Result<(), CoreError>;
    /// Stores a successor requested by the chain controller. Only the name is
    /// validated so that overdue chains can continue.
    async fn insert_occurrence(&self, data: NewOccurrenceData) -> Result<Occurrence, CoreError>;
}

/// Domain-specific trait for the remaining occurrence operations
#[async_trait]
pub trait OccurrenceRepository {
    /// Stores an occurrence entered directly, with full input validation.
    async fn add_occurrence(&self, data: NewOccurrenceData) -> Result<Occurrence, CoreError>;
    async fn find_occurrences_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Occurrence>, CoreError>;
    async fn find_occurrences(&self, filter: &OccurrenceFilter) -> Result<Vec<OccurrenceDetails>, CoreError>;
    /// The predecessor chain ending at `id`, oldest first.
    async fn find_chain(&self, id: Uuid) -> Result<Vec<Occurrence>, CoreError>;
    async fn delete_occurrence(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Domain-specific trait for project operations
#[async_trait]
pub trait ProjectRepository {
    async fn add_project(
        &self,
        name: String,
        due_date: Option<NaiveDate>,
    ) -> Result<Project, CoreError>;
    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, CoreError>;
    async fn find_projects(&self) -> Result<Vec<Project>, CoreError>;
    async fn delete_project(&self, name: String) -> Result<(), CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: OccurrenceStore + OccurrenceRepository + ProjectRepository {}

/// Store-level policy knobs.
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfig {
    /// Accept directly entered occurrences whose due date is already past.
    pub allow_past_due: bool,
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
    config: RepositoryConfig,
}

impl SqliteRepository {
    pub fn new(pool: DbPool, config: RepositoryConfig) -> Self {
        Self { pool, config }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub(crate) fn config(&self) -> &RepositoryConfig {
        &self.config
    }
}

impl Repository for SqliteRepository {}
