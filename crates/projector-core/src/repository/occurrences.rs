use crate::error::CoreError;
use crate::models::{NewOccurrenceData, Occurrence, OccurrenceFilter, OccurrenceStatus, Project};
use crate::repository::{OccurrenceDetails, SqliteRepository};
use crate::validation::{validate_new_occurrence, validate_occurrence_name};
use async_trait::async_trait;
use chrono::{Local, Utc};
use sqlx::{QueryBuilder, Sqlite, Transaction};
use uuid::Uuid;

#[async_trait]
impl super::OccurrenceStore for SqliteRepository {
    async fn find_occurrence_by_id(&self, id: Uuid) -> Result<Option<Occurrence>, CoreError> {
        let occurrence = sqlx::query_as("SELECT * FROM occurrences WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(occurrence)
    }

    async fn update_occurrence_status(
        &self,
        id: Uuid,
        status: OccurrenceStatus,
    ) -> Result<(), CoreError> {
        let result = sqlx::query("UPDATE occurrences SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Occurrence {} not found", id)));
        }
        Ok(())
    }

    async fn insert_occurrence(&self, data: NewOccurrenceData) -> Result<Occurrence, CoreError> {
        validate_occurrence_name(&data.name)?;

        let mut tx = self.pool().begin().await?;
        let occurrence = Self::insert_in_transaction(&mut tx, data).await?;
        tx.commit().await?;
        Ok(occurrence)
    }
}

#[async_trait]
impl super::OccurrenceRepository for SqliteRepository {
    async fn add_occurrence(&self, data: NewOccurrenceData) -> Result<Occurrence, CoreError> {
        let today = Local::now().date_naive();
        validate_new_occurrence(&data, today, self.config().allow_past_due)?;

        let mut tx = self.pool().begin().await?;
        let occurrence = Self::insert_in_transaction(&mut tx, data).await?;
        tx.commit().await?;
        Ok(occurrence)
    }

    async fn find_occurrences_by_short_id_prefix(
        &self,
        short_id: &str,
    ) -> Result<Vec<Occurrence>, CoreError> {
        // Ids are stored as 16-byte blobs; compare against their hex form.
        let mut pattern: String = short_id
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if pattern.is_empty() || !pattern.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }
        pattern.push('%');

        let occurrences = sqlx::query_as("SELECT * FROM occurrences WHERE lower(hex(id)) LIKE $1")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        Ok(occurrences)
    }

    async fn find_occurrences(
        &self,
        filter: &OccurrenceFilter,
    ) -> Result<Vec<OccurrenceDetails>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"SELECT o.*, p.name AS project_name
            FROM occurrences o
            LEFT JOIN projects p ON o.project_id = p.id
            WHERE 1 = 1"#,
        );

        if let Some(status) = filter.status {
            query_builder.push(" AND o.status = ");
            query_builder.push_bind(status);
        }

        if let Some(project) = &filter.project {
            query_builder.push(" AND p.name = ");
            query_builder.push_bind(project.clone());
        }

        query_builder.push(" ORDER BY o.due_date IS NULL, o.due_date, o.created_at");

        let occurrences = query_builder
            .build_query_as()
            .fetch_all(self.pool())
            .await?;
        Ok(occurrences)
    }

    async fn find_chain(&self, id: Uuid) -> Result<Vec<Occurrence>, CoreError> {
        let chain: Vec<Occurrence> = sqlx::query_as(
            r#"WITH RECURSIVE chain (id, depth) AS (
                SELECT id, 0 FROM occurrences WHERE id = $1
                UNION ALL
                SELECT o.parent_id, c.depth + 1
                FROM occurrences o
                JOIN chain c ON o.id = c.id
                WHERE o.parent_id IS NOT NULL
            )
            SELECT o.* FROM chain c
            JOIN occurrences o ON o.id = c.id
            ORDER BY c.depth DESC
            "#,
        )
        .bind(id)
        .fetch_all(self.pool())
        .await?;

        if chain.is_empty() {
            return Err(CoreError::NotFound(format!("Occurrence {} not found", id)));
        }
        Ok(chain)
    }

    async fn delete_occurrence(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM occurrences WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Occurrence {} not found", id)));
        }
        Ok(())
    }
}

impl SqliteRepository {
    /// Insert an occurrence within an existing transaction, resolving the
    /// project by name when only the name was given.
    pub(crate) async fn insert_in_transaction<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        mut data: NewOccurrenceData,
    ) -> Result<Occurrence, CoreError> {
        if data.project_id.is_none() {
            if let Some(project_name) = &data.project_name {
                let project: Option<Project> =
                    sqlx::query_as("SELECT * FROM projects WHERE name = $1")
                        .bind(project_name)
                        .fetch_optional(&mut **tx)
                        .await?;
                data.project_id = Some(
                    project
                        .map(|p| p.id)
                        .ok_or_else(|| CoreError::NotFound(format!("Project '{}' not found", project_name)))?,
                );
            }
        }

        let occurrence = sqlx::query_as(
            r#"INSERT INTO occurrences (id, project_id, name, note, due_date, status, repeat_count, repeat_interval, repeat_pattern, repeat_until, parent_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.project_id)
        .bind(&data.name)
        .bind(&data.note)
        .bind(data.due_date)
        .bind(data.status)
        .bind(data.repeat_count)
        .bind(data.repeat_interval)
        .bind(&data.repeat_pattern)
        .bind(data.repeat_until)
        .bind(data.parent_id)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await?;

        Ok(occurrence)
    }
}
