//! API key infrastructure: service, secret generation and repositories

pub mod generator;
pub mod postgres_repository;
pub mod repository;
pub mod service;

pub use generator::{ApiKeySecretGenerator, KEY_PREFIX};
pub use postgres_repository::PostgresApiKeyRepository;
pub use repository::InMemoryApiKeyRepository;
pub use service::ApiKeyService;
