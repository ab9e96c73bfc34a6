//! Botdeck API
//!
//! Chatbot SaaS backend: user accounts with signed session cookies,
//! owner-scoped API key lifecycle and owner-scoped project CRUD,
//! served as an HTTP JSON API over PostgreSQL (or fully in memory
//! for development and tests).

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::api_key::{ApiKeyService, InMemoryApiKeyRepository, PostgresApiKeyRepository};
use infrastructure::auth::{JwtSessionService, SessionConfig};
use infrastructure::project::{
    InMemoryProjectRepository, PostgresProjectRepository, ProjectService,
};
use infrastructure::storage::{
    connect_pool, run_storage_migrations, PostgresConfig, StorageType,
};
use infrastructure::user::{
    Argon2PasswordHasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    // Signing secret must exist before anything else starts
    let jwt_secret = resolve_jwt_secret(config)?;

    let session_service = Arc::new(JwtSessionService::new(SessionConfig::new(
        jwt_secret,
        config.auth.session_ttl_hours,
    )));

    let storage_backend =
        StorageType::parse(&config.storage.backend).unwrap_or(StorageType::InMemory);

    info!("Storage backend: {:?}", storage_backend);

    let hasher = Arc::new(Argon2PasswordHasher::new());

    let (user_service, api_key_service, project_service): (
        Arc<dyn api::state::UserServiceTrait>,
        Arc<dyn api::state::ApiKeyServiceTrait>,
        Arc<dyn api::state::ProjectServiceTrait>,
    ) = match storage_backend {
        StorageType::Postgres => {
            let database_url = std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

            info!("Connecting to PostgreSQL...");
            let pool = connect_pool(&PostgresConfig::new(database_url)).await?;
            info!("PostgreSQL connection established");

            run_storage_migrations(&pool).await?;

            (
                Arc::new(UserService::new(
                    Arc::new(PostgresUserRepository::new(pool.clone())),
                    hasher,
                )),
                Arc::new(ApiKeyService::new(Arc::new(PostgresApiKeyRepository::new(
                    pool.clone(),
                )))),
                Arc::new(ProjectService::new(Arc::new(PostgresProjectRepository::new(
                    pool,
                )))),
            )
        }
        StorageType::InMemory => {
            info!("Using in-memory storage");

            (
                Arc::new(UserService::new(
                    Arc::new(InMemoryUserRepository::new()),
                    hasher,
                )),
                Arc::new(ApiKeyService::new(Arc::new(InMemoryApiKeyRepository::new()))),
                Arc::new(ProjectService::new(Arc::new(
                    InMemoryProjectRepository::new(),
                ))),
            )
        }
    };

    Ok(AppState {
        user_service,
        api_key_service,
        project_service,
        session_service,
        cookie_secure: config.auth.cookie_secure,
    })
}

/// Resolve the session signing secret, config first, then JWT_SECRET env
fn resolve_jwt_secret(config: &AppConfig) -> anyhow::Result<String> {
    let secret = if config.auth.jwt_secret.is_empty() {
        std::env::var("JWT_SECRET").unwrap_or_default()
    } else {
        config.auth.jwt_secret.clone()
    };

    if secret.is_empty() {
        anyhow::bail!(
            "Session signing secret is required: set auth.jwt_secret or the JWT_SECRET environment variable"
        );
    }

    Ok(secret)
}
