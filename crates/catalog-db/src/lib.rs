//! # Catalog DB
//!
//! PostgreSQL connection pool and schema migrations for the Catalog API.
//!
//! # Example
//!
//! ```ignore
//! use catalog_config::DatabaseConfig;
//! use catalog_db::{init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env();
//! let pool = init_db_pool(&config).await?;
//! run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use catalog_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, instrument};

pub use sqlx::PgPool;

/// Opens a connection pool against `DATABASE_URL`.
///
/// Fails when the URL is missing or the first connection cannot be made.
#[instrument(skip(config), fields(max_connections = config.max_connections))]
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;

    info!("Database connection established");
    Ok(pool)
}

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Closes every connection in the pool, waiting for checked-out ones.
pub async fn close_db_pool(pool: &PgPool) {
    pool.close().await;
    info!("Database pool closed");
}
