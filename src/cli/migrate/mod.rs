//! Migrate command - applies or reverts embedded migrations and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{
    connect_pool, revert_latest_migration, run_storage_migrations, PostgresConfig,
};

/// Apply all pending migrations, or revert the latest one
pub async fn run(revert: bool) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    info!("Connecting to PostgreSQL...");
    let pool = connect_pool(&PostgresConfig::new(database_url)).await?;

    if revert {
        match revert_latest_migration(&pool).await? {
            Some(version) => info!(version, "Migration reverted"),
            None => info!("No applied migrations to revert"),
        }
    } else {
        run_storage_migrations(&pool).await?;
        info!("Migrations applied");
    }

    Ok(())
}
