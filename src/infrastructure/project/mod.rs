//! Project infrastructure: service and repositories

pub mod postgres_repository;
pub mod repository;
pub mod service;

pub use postgres_repository::PostgresProjectRepository;
pub use repository::InMemoryProjectRepository;
pub use service::ProjectService;
