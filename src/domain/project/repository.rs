//! Project repository trait

use std::fmt::Debug;

use async_trait::async_trait;

use super::{Project, ProjectId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Persistence operations on projects
///
/// Unlike API keys, scoped reads and writes distinguish "no such row" so
/// the service can return an explicit not-found to the caller.
#[async_trait]
pub trait ProjectRepository: Send + Sync + Debug {
    /// Insert a new project
    async fn create(&self, project: Project) -> Result<Project, DomainError>;

    /// List all projects owned by a user, oldest first
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, DomainError>;

    /// Get the project matching `(id, owner)`
    async fn get_scoped(
        &self,
        owner: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, DomainError>;

    /// Rename the project matching `(id, owner)`, bumping `updated_at`;
    /// returns the updated row, or None when no row matched
    async fn rename_scoped(
        &self,
        owner: &UserId,
        id: &ProjectId,
        name: &str,
    ) -> Result<Option<Project>, DomainError>;

    /// Delete the project matching `(id, owner)`;
    /// returns whether a row was removed
    async fn delete_scoped(&self, owner: &UserId, id: &ProjectId) -> Result<bool, DomainError>;
}
