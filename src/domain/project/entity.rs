//! Project entity and identifier

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Errors that can occur during project input validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectValidationError {
    #[error("Project name is required")]
    EmptyName,

    #[error("Project name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Invalid project id")]
    InvalidId,
}

const MAX_NAME_LENGTH: usize = 100;

/// Validate a project display name
pub fn validate_project_name(name: &str) -> Result<(), ProjectValidationError> {
    if name.trim().is_empty() {
        return Err(ProjectValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ProjectValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Project identifier - a UUID v4
///
/// Path parameters are format-checked through `parse` before any store
/// access; a malformed id never reaches the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Generate a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(value: &str) -> Result<Self, ProjectValidationError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ProjectValidationError::InvalidId)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ProjectId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project entity, owned by exactly one user
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project owned by `user_id`
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        let now = Utc::now();

        Self {
            id: ProjectId::new(),
            name: name.into(),
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a project from stored fields
    pub fn restore(
        id: ProjectId,
        name: String,
        user_id: UserId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            user_id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }
}
