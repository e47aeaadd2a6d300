//! # Coursebook DB
//!
//! The persistence collaborator behind the API.
//!
//! - [`Store`]: async trait the handlers talk to
//! - [`PgStore`]: PostgreSQL implementation on a `sqlx` pool
//! - `MemoryStore`: in-process implementation enforcing the same uniqueness
//!   rules, available in tests and behind the `test-utils` feature
//!
//! # Example
//!
//! ```ignore
//! use coursebook_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&config.database).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

pub mod postgres;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::{COURSES_TITLE_KEY, PgStore, USERS_EMAIL_ADDRESS_KEY};
pub use store::Store;

use coursebook_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool sized from `config`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    info!(
        max_connections = config.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Applies pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}
