use crate::error::CoreError;
use crate::models::Project;
use crate::repository::SqliteRepository;
use crate::validation::validate_new_project;
use async_trait::async_trait;
use chrono::{Local, NaiveDate, Utc};
use uuid::Uuid;

#[async_trait]
impl super::ProjectRepository for SqliteRepository {
    async fn add_project(
        &self,
        name: String,
        due_date: Option<NaiveDate>,
    ) -> Result<Project, CoreError> {
        let today = Local::now().date_naive();
        validate_new_project(&name, due_date, today, self.config().allow_past_due)?;

        if self.find_project_by_name(&name).await?.is_some() {
            return Err(CoreError::Validation(format!(
                "project '{}' already exists",
                name
            )));
        }

        let project = sqlx::query_as(
            r#"INSERT INTO projects (id, name, due_date, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, due_date, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(due_date)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await?;

        Ok(project)
    }

    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, CoreError> {
        let project = sqlx::query_as("SELECT * FROM projects WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(project)
    }

    async fn find_projects(&self) -> Result<Vec<Project>, CoreError> {
        let projects = sqlx::query_as("SELECT id, name, due_date, created_at FROM projects ORDER BY name")
            .fetch_all(self.pool())
            .await?;
        Ok(projects)
    }

    async fn delete_project(&self, name: String) -> Result<(), CoreError> {
        let project = self
            .find_project_by_name(&name)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("Project '{}' not found", name)))?;

        // Occurrences referencing the project block deletion.
        let occurrence_count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM occurrences WHERE project_id = $1")
                .bind(project.id)
                .fetch_one(self.pool())
                .await?;

        if occurrence_count.0 > 0 {
            return Err(CoreError::Validation(format!(
                "cannot delete project '{}' because it has {} associated occurrence(s). Delete or move them first.",
                name, occurrence_count.0
            )));
        }

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project.id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("Project '{}' not found", name)));
        }
        Ok(())
    }
}
