//! API key repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::ApiKey;
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Partial update applied to a key; absent fields are left unchanged.
/// `updated_at` is always bumped, even for an empty update.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyUpdate {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// Persistence operations on API keys
///
/// `update_scoped` and `delete_scoped` match on `(key, owner)` in a single
/// predicate and report only the number of affected rows. A non-owner
/// presenting another user's key affects zero rows - indistinguishable
/// from the key not existing at all.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + Debug {
    /// Insert a new key; fails with Conflict when the secret collides
    async fn create(&self, key: ApiKey) -> Result<ApiKey, DomainError>;

    /// List all keys owned by a user, oldest first
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ApiKey>, DomainError>;

    /// Apply a partial update to the key matching `(key, owner)`;
    /// returns the number of rows affected (0 or 1)
    async fn update_scoped(
        &self,
        owner: &UserId,
        key: &str,
        update: ApiKeyUpdate,
    ) -> Result<u64, DomainError>;

    /// Hard-delete the key matching `(key, owner)`;
    /// returns the number of rows affected (0 or 1)
    async fn delete_scoped(&self, owner: &UserId, key: &str) -> Result<u64, DomainError>;
}
