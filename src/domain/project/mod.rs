//! Project domain: entity, validation, repository trait

mod entity;
mod repository;

pub use entity::{validate_project_name, Project, ProjectId, ProjectValidationError};
pub use repository::ProjectRepository;
