use std::sync::Arc;

use catalog_config::{CorsConfig, DatabaseConfig, JwtConfig};
use catalog_db::{init_db_pool, run_migrations};

use crate::store::{PgStore, Store};

/// Shared by every handler. Cloning is cheap: the store is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

/// Connects to PostgreSQL, applies migrations and loads configuration from the environment.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
    run_migrations(&pool).await?;

    Ok(AppState::new(
        Arc::new(PgStore::new(pool)),
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
