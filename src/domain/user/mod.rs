//! User domain: entity, validation, repository trait

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_name, validate_password, UserValidationError};
