//! Project lifecycle service

use std::sync::Arc;

use tracing::info;

use crate::domain::project::{
    validate_project_name, Project, ProjectId, ProjectRepository,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Project service enforcing ownership and id format checks
///
/// Path identifiers are parsed before any repository call; a malformed id
/// is rejected without a store round-trip. Unlike keys, an ownership
/// mismatch here surfaces as an explicit not-found.
#[derive(Debug)]
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List all projects owned by `owner`
    pub async fn list_all(&self, owner: &UserId) -> Result<Vec<Project>, DomainError> {
        self.repository.list_by_owner(owner).await
    }

    /// Get one project by id, scoped to `owner`
    pub async fn get_one(&self, owner: &UserId, project_id: &str) -> Result<Project, DomainError> {
        let id = parse_project_id(project_id)?;

        self.repository
            .get_scoped(owner, &id)
            .await?
            .ok_or_else(|| DomainError::not_found("Project with the given id not found"))
    }

    /// Create a new project owned by `owner`
    pub async fn create(&self, owner: &UserId, name: &str) -> Result<Project, DomainError> {
        validate_project_name(name).map_err(|e| DomainError::validation(e.to_string()))?;

        let project = Project::new(name, *owner);
        let created = self.repository.create(project).await?;

        info!(project_id = %created.id(), owner = %owner, "Project created");

        Ok(created)
    }

    /// Rename a project, scoped to `owner`
    pub async fn update(
        &self,
        owner: &UserId,
        project_id: &str,
        name: &str,
    ) -> Result<Project, DomainError> {
        // Body validation comes first, then the id format check
        validate_project_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        let id = parse_project_id(project_id)?;

        let updated = self
            .repository
            .rename_scoped(owner, &id, name)
            .await?
            .ok_or_else(|| DomainError::not_found("Project with the given id not found"))?;

        info!(project_id = %id, owner = %owner, "Project updated");

        Ok(updated)
    }

    /// Delete a project, scoped to `owner`
    pub async fn delete(&self, owner: &UserId, project_id: &str) -> Result<(), DomainError> {
        let id = parse_project_id(project_id)?;

        let deleted = self.repository.delete_scoped(owner, &id).await?;

        if !deleted {
            return Err(DomainError::not_found(
                "Project with the given id not found",
            ));
        }

        info!(project_id = %id, owner = %owner, "Project deleted");

        Ok(())
    }
}

fn parse_project_id(value: &str) -> Result<ProjectId, DomainError> {
    ProjectId::parse(value).map_err(|e| DomainError::invalid_id(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::project::repository::InMemoryProjectRepository;

    fn create_service() -> ProjectService<InMemoryProjectRepository> {
        ProjectService::new(Arc::new(InMemoryProjectRepository::new()))
    }

    #[tokio::test]
    async fn test_create_get_delete_cycle() {
        let service = create_service();
        let owner = UserId::new();

        let project = service.create(&owner, "My Bot").await.unwrap();
        let id = project.id().to_string();

        let fetched = service.get_one(&owner, &id).await.unwrap();
        assert_eq!(fetched.name(), "My Bot");

        service.delete(&owner, &id).await.unwrap();

        let result = service.get_one(&owner, &id).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let service = create_service();
        let owner = UserId::new();

        let result = service.create(&owner, "").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_malformed_id_rejected_without_store_access() {
        let service = create_service();
        let owner = UserId::new();

        let result = service.get_one(&owner, "not-a-uuid").await;
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));

        let result = service.delete(&owner, "not-a-uuid").await;
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));

        let result = service.update(&owner, "not-a-uuid", "New name").await;
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_update_renames_and_touches() {
        let service = create_service();
        let owner = UserId::new();

        let project = service.create(&owner, "My Bot").await.unwrap();
        let before = project.updated_at();

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let updated = service
            .update(&owner, &project.id().to_string(), "Renamed Bot")
            .await
            .unwrap();

        assert_eq!(updated.name(), "Renamed Bot");
        assert!(updated.updated_at() > before);
    }

    #[tokio::test]
    async fn test_ownership_mismatch_is_not_found() {
        let service = create_service();
        let alice = UserId::new();
        let bob = UserId::new();

        let project = service.create(&alice, "Alice's Bot").await.unwrap();
        let id = project.id().to_string();

        assert!(matches!(
            service.get_one(&bob, &id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.update(&bob, &id, "hijack").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(&bob, &id).await,
            Err(DomainError::NotFound { .. })
        ));

        // Alice still sees her project, unchanged
        let fetched = service.get_one(&alice, &id).await.unwrap();
        assert_eq!(fetched.name(), "Alice's Bot");
    }

    #[tokio::test]
    async fn test_list_scoped_to_owner() {
        let service = create_service();
        let alice = UserId::new();
        let bob = UserId::new();

        service.create(&alice, "A1").await.unwrap();
        service.create(&alice, "A2").await.unwrap();
        service.create(&bob, "B1").await.unwrap();

        let projects = service.list_all(&alice).await.unwrap();
        assert_eq!(projects.len(), 2);
    }
}
