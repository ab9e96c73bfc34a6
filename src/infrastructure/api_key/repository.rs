//! In-memory API key repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKey, ApiKeyId, ApiKeyRepository, ApiKeyUpdate};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of ApiKeyRepository
#[derive(Debug, Default)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<HashMap<ApiKeyId, ApiKey>>>,
}

impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn create(&self, key: ApiKey) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;

        if keys.values().any(|k| k.key() == key.key()) {
            return Err(DomainError::conflict("API key secret already exists"));
        }

        keys.insert(*key.id(), key.clone());

        Ok(key)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ApiKey>, DomainError> {
        let keys = self.keys.read().await;

        let mut owned: Vec<ApiKey> = keys
            .values()
            .filter(|k| k.user_id() == owner)
            .cloned()
            .collect();

        owned.sort_by_key(|k| k.created_at());

        Ok(owned)
    }

    async fn update_scoped(
        &self,
        owner: &UserId,
        key: &str,
        update: ApiKeyUpdate,
    ) -> Result<u64, DomainError> {
        let mut keys = self.keys.write().await;

        let matched = keys
            .values_mut()
            .find(|k| k.key() == key && k.user_id() == owner);

        match matched {
            Some(entry) => {
                if let Some(name) = update.name {
                    entry.set_name(name);
                }
                if let Some(is_active) = update.is_active {
                    entry.set_active(is_active);
                }
                entry.touch();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_scoped(&self, owner: &UserId, key: &str) -> Result<u64, DomainError> {
        let mut keys = self.keys.write().await;

        let id = keys
            .values()
            .find(|k| k.key() == key && k.user_id() == owner)
            .map(|k| *k.id());

        match id {
            Some(id) => {
                keys.remove(&id);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list() {
        let repo = InMemoryApiKeyRepository::new();
        let owner = UserId::new();

        repo.create(ApiKey::new("first", "bs-first", owner, None))
            .await
            .unwrap();
        repo.create(ApiKey::new("second", "bs-second", owner, None))
            .await
            .unwrap();

        let keys = repo.list_by_owner(&owner).await.unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].name(), "first");
    }

    #[tokio::test]
    async fn test_duplicate_secret_conflict() {
        let repo = InMemoryApiKeyRepository::new();
        let owner = UserId::new();

        repo.create(ApiKey::new("first", "bs-same", owner, None))
            .await
            .unwrap();

        let result = repo
            .create(ApiKey::new("second", "bs-same", owner, None))
            .await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_scoped_bumps_updated_at() {
        let repo = InMemoryApiKeyRepository::new();
        let owner = UserId::new();

        let key = repo
            .create(ApiKey::new("first", "bs-first", owner, None))
            .await
            .unwrap();
        let before = key.updated_at();

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        // Empty update still bumps the timestamp
        let affected = repo
            .update_scoped(&owner, "bs-first", ApiKeyUpdate::default())
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let keys = repo.list_by_owner(&owner).await.unwrap();
        assert!(keys[0].updated_at() > before);
    }

    #[tokio::test]
    async fn test_scoped_ops_ignore_other_owner() {
        let repo = InMemoryApiKeyRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();

        repo.create(ApiKey::new("alice-key", "bs-alice", alice, None))
            .await
            .unwrap();

        let updated = repo
            .update_scoped(&bob, "bs-alice", ApiKeyUpdate::default())
            .await
            .unwrap();
        assert_eq!(updated, 0);

        let deleted = repo.delete_scoped(&bob, "bs-alice").await.unwrap();
        assert_eq!(deleted, 0);

        assert_eq!(repo.list_by_owner(&alice).await.unwrap().len(), 1);
    }
}
