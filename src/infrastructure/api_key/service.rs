//! API key lifecycle service

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::domain::api_key::{
    validate_expires_in_days, validate_key_name, validate_key_secret, ApiKey, ApiKeyRepository,
    ApiKeyUpdate,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

use super::generator::ApiKeySecretGenerator;

/// API key service enforcing ownership and input validation
///
/// Updates and revocations never distinguish "not yours" from "does not
/// exist": both come back as zero affected rows and are reported as
/// success to the caller, hiding the existence of other users' keys.
#[derive(Debug)]
pub struct ApiKeyService<R: ApiKeyRepository> {
    repository: Arc<R>,
    generator: ApiKeySecretGenerator,
}

impl<R: ApiKeyRepository> ApiKeyService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: ApiKeySecretGenerator::new(),
        }
    }

    /// Generate a new key for `owner`
    ///
    /// The returned entity carries the plaintext secret; the caller shows
    /// it to the user exactly once.
    pub async fn generate(
        &self,
        owner: &UserId,
        name: &str,
        expires_in_days: Option<i64>,
    ) -> Result<ApiKey, DomainError> {
        validate_key_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_expires_in_days(expires_in_days)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let secret = self.generator.generate();
        let expires_at: Option<DateTime<Utc>> =
            expires_in_days.map(|days| Utc::now() + Duration::days(days));

        let api_key = ApiKey::new(name, secret, *owner, expires_at);
        let created = self.repository.create(api_key).await?;

        info!(key_id = %created.id(), owner = %owner, "API key generated");

        Ok(created)
    }

    /// List all keys owned by `owner`
    pub async fn list_all(&self, owner: &UserId) -> Result<Vec<ApiKey>, DomainError> {
        self.repository.list_by_owner(owner).await
    }

    /// Update name and/or active flag of the key matching `(key, owner)`
    ///
    /// Returns the number of affected rows; zero is not an error.
    pub async fn update(
        &self,
        owner: &UserId,
        key: &str,
        name: Option<String>,
        is_active: Option<bool>,
    ) -> Result<u64, DomainError> {
        validate_key_secret(key).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(ref name) = name {
            validate_key_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        let affected = self
            .repository
            .update_scoped(owner, key, ApiKeyUpdate { name, is_active })
            .await?;

        debug!(owner = %owner, affected, "API key update applied");

        Ok(affected)
    }

    /// Hard-delete the key matching `(key, owner)`
    ///
    /// Returns the number of affected rows; zero is not an error.
    pub async fn revoke(&self, owner: &UserId, key: &str) -> Result<u64, DomainError> {
        validate_key_secret(key).map_err(|e| DomainError::validation(e.to_string()))?;

        let affected = self.repository.delete_scoped(owner, key).await?;

        info!(owner = %owner, affected, "API key revoked");

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api_key::repository::InMemoryApiKeyRepository;

    fn create_service() -> ApiKeyService<InMemoryApiKeyRepository> {
        ApiKeyService::new(Arc::new(InMemoryApiKeyRepository::new()))
    }

    #[tokio::test]
    async fn test_generate_key() {
        let service = create_service();
        let owner = UserId::new();

        let key = service.generate(&owner, "CI key", None).await.unwrap();

        assert_eq!(key.name(), "CI key");
        assert!(key.key().starts_with("bs-"));
        assert_eq!(key.key().len(), "bs-".len() + 48);
        assert!(key.is_active());
        assert_eq!(key.usage_count(), 0);
        assert!(key.expires_at().is_none());
    }

    #[tokio::test]
    async fn test_generate_with_expiry() {
        let service = create_service();
        let owner = UserId::new();

        let key = service.generate(&owner, "CI key", Some(30)).await.unwrap();

        let expires_at = key.expires_at().unwrap();
        let expected = Utc::now() + Duration::days(30);
        let delta = (expires_at - expected).num_seconds().abs();
        assert!(delta < 5);
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_input() {
        let service = create_service();
        let owner = UserId::new();

        assert!(service.generate(&owner, "", None).await.is_err());
        assert!(service.generate(&owner, "CI key", Some(0)).await.is_err());
        assert!(service.generate(&owner, "CI key", Some(-3)).await.is_err());
    }

    #[tokio::test]
    async fn test_generate_rejects_huge_expiry() {
        let service = create_service();
        let owner = UserId::new();

        // Values past the cap must come back as a validation error,
        // not blow up in the expiry arithmetic
        let result = service.generate(&owner, "CI key", Some(i64::MAX)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service.generate(&owner, "CI key", Some(36_501)).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_generated_secrets_distinct() {
        let service = create_service();
        let owner = UserId::new();

        let a = service.generate(&owner, "a", None).await.unwrap();
        let b = service.generate(&owner, "b", None).await.unwrap();

        assert_ne!(a.key(), b.key());
    }

    #[tokio::test]
    async fn test_list_scoped_to_owner() {
        let service = create_service();
        let alice = UserId::new();
        let bob = UserId::new();

        service.generate(&alice, "alice-key", None).await.unwrap();
        service.generate(&bob, "bob-key", None).await.unwrap();

        let keys = service.list_all(&alice).await.unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].name(), "alice-key");
    }

    #[tokio::test]
    async fn test_update_own_key() {
        let service = create_service();
        let owner = UserId::new();

        let key = service.generate(&owner, "CI key", None).await.unwrap();

        let affected = service
            .update(&owner, key.key(), Some("Renamed".into()), Some(false))
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let keys = service.list_all(&owner).await.unwrap();
        assert_eq!(keys[0].name(), "Renamed");
        assert!(!keys[0].is_active());
    }

    #[tokio::test]
    async fn test_update_foreign_key_affects_nothing() {
        let service = create_service();
        let alice = UserId::new();
        let bob = UserId::new();

        let key = service.generate(&alice, "alice-key", None).await.unwrap();

        // Bob presents Alice's valid secret: zero rows, no error
        let affected = service
            .update(&bob, key.key(), Some("stolen".into()), None)
            .await
            .unwrap();
        assert_eq!(affected, 0);

        let keys = service.list_all(&alice).await.unwrap();
        assert_eq!(keys[0].name(), "alice-key");
    }

    #[tokio::test]
    async fn test_update_requires_key() {
        let service = create_service();
        let owner = UserId::new();

        let result = service.update(&owner, "", Some("x".into()), None).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_revoke_own_key() {
        let service = create_service();
        let owner = UserId::new();

        let key = service.generate(&owner, "CI key", None).await.unwrap();

        let affected = service.revoke(&owner, key.key()).await.unwrap();
        assert_eq!(affected, 1);

        assert!(service.list_all(&owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_revoke_foreign_key_is_silent_noop() {
        let service = create_service();
        let alice = UserId::new();
        let bob = UserId::new();

        let key = service.generate(&alice, "alice-key", None).await.unwrap();

        let affected = service.revoke(&bob, key.key()).await.unwrap();
        assert_eq!(affected, 0);

        // Alice's key is untouched
        assert_eq!(service.list_all(&alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_revoke_unknown_key_is_silent_noop() {
        let service = create_service();
        let owner = UserId::new();

        let affected = service.revoke(&owner, "bs-does-not-exist").await.unwrap();
        assert_eq!(affected, 0);
    }
}
