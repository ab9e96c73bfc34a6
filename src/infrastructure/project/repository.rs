//! In-memory project repository implementation

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::project::{Project, ProjectId, ProjectRepository};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of ProjectRepository
#[derive(Debug, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, DomainError> {
        let mut projects = self.projects.write().await;
        projects.insert(*project.id(), project.clone());
        Ok(project)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, DomainError> {
        let projects = self.projects.read().await;

        let mut owned: Vec<Project> = projects
            .values()
            .filter(|p| p.user_id() == owner)
            .cloned()
            .collect();

        owned.sort_by_key(|p| p.created_at());

        Ok(owned)
    }

    async fn get_scoped(
        &self,
        owner: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, DomainError> {
        let projects = self.projects.read().await;

        Ok(projects
            .get(id)
            .filter(|p| p.user_id() == owner)
            .cloned())
    }

    async fn rename_scoped(
        &self,
        owner: &UserId,
        id: &ProjectId,
        name: &str,
    ) -> Result<Option<Project>, DomainError> {
        let mut projects = self.projects.write().await;

        match projects.get_mut(id).filter(|p| p.user_id() == owner) {
            Some(project) => {
                project.set_name(name);
                Ok(Some(project.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_scoped(&self, owner: &UserId, id: &ProjectId) -> Result<bool, DomainError> {
        let mut projects = self.projects.write().await;

        let owned = projects.get(id).is_some_and(|p| p.user_id() == owner);

        if owned {
            projects.remove(id);
        }

        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_scoped() {
        let repo = InMemoryProjectRepository::new();
        let owner = UserId::new();

        let project = repo.create(Project::new("My Bot", owner)).await.unwrap();

        let fetched = repo.get_scoped(&owner, project.id()).await.unwrap();
        assert!(fetched.is_some());

        let other = UserId::new();
        let fetched = repo.get_scoped(&other, project.id()).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_rename_scoped() {
        let repo = InMemoryProjectRepository::new();
        let owner = UserId::new();

        let project = repo.create(Project::new("My Bot", owner)).await.unwrap();

        let renamed = repo
            .rename_scoped(&owner, project.id(), "Renamed")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name(), "Renamed");

        let other = UserId::new();
        let result = repo
            .rename_scoped(&other, project.id(), "hijack")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_scoped() {
        let repo = InMemoryProjectRepository::new();
        let owner = UserId::new();
        let other = UserId::new();

        let project = repo.create(Project::new("My Bot", owner)).await.unwrap();

        assert!(!repo.delete_scoped(&other, project.id()).await.unwrap());
        assert!(repo.delete_scoped(&owner, project.id()).await.unwrap());
        assert!(!repo.delete_scoped(&owner, project.id()).await.unwrap());
    }
}
