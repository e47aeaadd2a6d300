use std::fmt;
use std::sync::Arc;

use coursebook_config::{AppConfig, CorsConfig};
use coursebook_db::{PgStore, Store, init_db_pool, run_migrations};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// bcrypt work factor for new passwords.
    pub hash_cost: u32,
    pub cors_config: CorsConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("hash_cost", &self.hash_cost)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, hash_cost: u32, cors_config: CorsConfig) -> Self {
        Self {
            store,
            hash_cost,
            cors_config,
        }
    }
}

/// Connects to PostgreSQL, applies migrations and builds the shared state.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db_pool(&config.database).await?;
    run_migrations(&pool).await?;

    Ok(AppState::new(
        Arc::new(PgStore::new(pool)),
        config.password.hash_cost,
        config.cors.clone(),
    ))
}
