//! PostgreSQL API key repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyUpdate};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of ApiKeyRepository
///
/// Ownership is enforced inside each statement's WHERE clause:
/// `key = $1 AND user_id = $2`. A non-matching owner simply affects
/// zero rows.
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_FIELDS: &str = "id, name, key, user_id, last_used, expires_at, \
     is_active, usage_count, created_at, updated_at";

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn create(&self, key: ApiKey) -> Result<ApiKey, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (id, name, key, user_id, last_used, expires_at,
                                  is_active, usage_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(key.id().as_uuid())
        .bind(key.name())
        .bind(key.key())
        .bind(key.user_id().as_uuid())
        .bind(key.last_used())
        .bind(key.expires_at())
        .bind(key.is_active())
        .bind(key.usage_count())
        .bind(key.created_at())
        .bind(key.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict("API key secret already exists")
            } else {
                DomainError::storage(format!("Failed to create API key: {}", e))
            }
        })?;

        Ok(key)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ApiKey>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM api_keys WHERE user_id = $1 ORDER BY created_at",
            SELECT_FIELDS
        ))
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list API keys: {}", e)))?;

        rows.iter().map(row_to_api_key).collect()
    }

    async fn update_scoped(
        &self,
        owner: &UserId,
        key: &str,
        update: ApiKeyUpdate,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE api_keys
            SET name = COALESCE($3, name),
                is_active = COALESCE($4, is_active),
                updated_at = NOW()
            WHERE key = $1 AND user_id = $2
            "#,
        )
        .bind(key)
        .bind(owner.as_uuid())
        .bind(update.name)
        .bind(update.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update API key: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete_scoped(&self, owner: &UserId, key: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE key = $1 AND user_id = $2")
            .bind(key)
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete API key: {}", e)))?;

        Ok(result.rows_affected())
    }
}

fn row_to_api_key(row: &sqlx::postgres::PgRow) -> Result<ApiKey, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let user_id: uuid::Uuid = row.get("user_id");

    Ok(ApiKey::restore(
        ApiKeyId::from(id),
        row.get("name"),
        row.get("key"),
        UserId::from(user_id),
        row.get("last_used"),
        row.get("expires_at"),
        row.get("is_active"),
        row.get("usage_count"),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}
