//! PostgreSQL project repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::project::{Project, ProjectId, ProjectRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of ProjectRepository
///
/// Ownership is enforced inside each statement's WHERE clause:
/// `id = $1 AND user_id = $2`.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_FIELDS: &str = "id, name, user_id, created_at, updated_at";

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, name, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(project.id().as_uuid())
        .bind(project.name())
        .bind(project.user_id().as_uuid())
        .bind(project.created_at())
        .bind(project.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create project: {}", e)))?;

        Ok(project)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM projects WHERE user_id = $1 ORDER BY created_at",
            SELECT_FIELDS
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list projects: {}", e)))?;

        rows.iter().map(row_to_project).collect()
    }

    async fn get_scoped(
        &self,
        owner: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM projects WHERE id = $1 AND user_id = $2",
            SELECT_FIELDS
        ))
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get project: {}", e)))?;

        row.as_ref().map(row_to_project).transpose()
    }

    async fn rename_scoped(
        &self,
        owner: &UserId,
        id: &ProjectId,
        name: &str,
    ) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE projects
            SET name = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, user_id, created_at, updated_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(owner.as_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to rename project: {}", e)))?;

        row.as_ref().map(row_to_project).transpose()
    }

    async fn delete_scoped(&self, owner: &UserId, id: &ProjectId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete project: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_project(row: &sqlx::postgres::PgRow) -> Result<Project, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let user_id: uuid::Uuid = row.get("user_id");

    Ok(Project::restore(
        ProjectId::from(id),
        row.get("name"),
        UserId::from(user_id),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}
