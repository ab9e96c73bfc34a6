//! API key domain: entity, validation, repository trait

mod entity;
mod repository;
mod validation;

pub use entity::{ApiKey, ApiKeyId};
pub use repository::{ApiKeyRepository, ApiKeyUpdate};
pub use validation::{
    validate_expires_in_days, validate_key_name, validate_key_secret, ApiKeyValidationError,
    MAX_EXPIRES_IN_DAYS,
};
