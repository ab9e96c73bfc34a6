//! Domain layer: entities, validation rules and repository traits

pub mod api_key;
pub mod error;
pub mod project;
pub mod user;

pub use api_key::{ApiKey, ApiKeyId};
pub use error::DomainError;
pub use project::{Project, ProjectId};
pub use user::{User, UserId};
