//! Application state for shared services

use std::sync::Arc;

use crate::domain::api_key::{ApiKey, ApiKeyRepository};
use crate::domain::project::{Project, ProjectRepository};
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::api_key::ApiKeyService;
use crate::infrastructure::auth::SessionTokenIssuer;
use crate::infrastructure::project::ProjectService;
use crate::infrastructure::user::{PasswordHasher, SignupRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub api_key_service: Arc<dyn ApiKeyServiceTrait>,
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub session_service: Arc<dyn SessionTokenIssuer>,
    /// Whether session cookies carry the Secure attribute
    pub cookie_secure: bool,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> Result<User, DomainError>;
    async fn login(&self, email: &str, password: &str) -> Result<User, DomainError>;
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;
    async fn count(&self) -> Result<usize, DomainError>;
}

/// Trait for API key service operations
#[async_trait::async_trait]
pub trait ApiKeyServiceTrait: Send + Sync {
    async fn generate(
        &self,
        owner: &UserId,
        name: &str,
        expires_in_days: Option<i64>,
    ) -> Result<ApiKey, DomainError>;
    async fn list_all(&self, owner: &UserId) -> Result<Vec<ApiKey>, DomainError>;
    async fn update(
        &self,
        owner: &UserId,
        key: &str,
        name: Option<String>,
        is_active: Option<bool>,
    ) -> Result<u64, DomainError>;
    async fn revoke(&self, owner: &UserId, key: &str) -> Result<u64, DomainError>;
}

/// Trait for project service operations
#[async_trait::async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    async fn list_all(&self, owner: &UserId) -> Result<Vec<Project>, DomainError>;
    async fn get_one(&self, owner: &UserId, project_id: &str) -> Result<Project, DomainError>;
    async fn create(&self, owner: &UserId, name: &str) -> Result<Project, DomainError>;
    async fn update(
        &self,
        owner: &UserId,
        project_id: &str,
        name: &str,
    ) -> Result<Project, DomainError>;
    async fn delete(&self, owner: &UserId, project_id: &str) -> Result<(), DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        UserService::signup(self, request).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        UserService::login(self, email, password).await
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        UserService::get(self, id).await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        UserService::count(self).await
    }
}

#[async_trait::async_trait]
impl<R: ApiKeyRepository + 'static> ApiKeyServiceTrait for ApiKeyService<R> {
    async fn generate(
        &self,
        owner: &UserId,
        name: &str,
        expires_in_days: Option<i64>,
    ) -> Result<ApiKey, DomainError> {
        ApiKeyService::generate(self, owner, name, expires_in_days).await
    }

    async fn list_all(&self, owner: &UserId) -> Result<Vec<ApiKey>, DomainError> {
        ApiKeyService::list_all(self, owner).await
    }

    async fn update(
        &self,
        owner: &UserId,
        key: &str,
        name: Option<String>,
        is_active: Option<bool>,
    ) -> Result<u64, DomainError> {
        ApiKeyService::update(self, owner, key, name, is_active).await
    }

    async fn revoke(&self, owner: &UserId, key: &str) -> Result<u64, DomainError> {
        ApiKeyService::revoke(self, owner, key).await
    }
}

#[async_trait::async_trait]
impl<R: ProjectRepository + 'static> ProjectServiceTrait for ProjectService<R> {
    async fn list_all(&self, owner: &UserId) -> Result<Vec<Project>, DomainError> {
        ProjectService::list_all(self, owner).await
    }

    async fn get_one(&self, owner: &UserId, project_id: &str) -> Result<Project, DomainError> {
        ProjectService::get_one(self, owner, project_id).await
    }

    async fn create(&self, owner: &UserId, name: &str) -> Result<Project, DomainError> {
        ProjectService::create(self, owner, name).await
    }

    async fn update(
        &self,
        owner: &UserId,
        project_id: &str,
        name: &str,
    ) -> Result<Project, DomainError> {
        ProjectService::update(self, owner, project_id, name).await
    }

    async fn delete(&self, owner: &UserId, project_id: &str) -> Result<(), DomainError> {
        ProjectService::delete(self, owner, project_id).await
    }
}
