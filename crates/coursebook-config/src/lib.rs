//! # Coursebook Config
//!
//! Configuration types for the Coursebook API, loaded from environment
//! variables:
//!
//! - [`server`]: bind address (`APP_HOST`, `APP_PORT`)
//! - [`database`]: connection settings (`DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`)
//! - [`cors`]: allowed origins (`ALLOWED_ORIGINS`)
//! - [`password`]: bcrypt work factor (`BCRYPT_COST`)
//! - [`logging`]: log filter and file directory (`LOG_LEVEL`, `LOG_DIR`)
//! - [`metrics`]: optional Prometheus listener (`METRICS_PORT`)
//!
//! Each type has a `from_env()` constructor and a `from_lookup()` variant
//! that takes any `Fn(&str) -> Option<String>`, which is what the tests use.
//!
//! # Example
//!
//! ```ignore
//! use coursebook_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.address());
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod password;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

use std::str::FromStr;

/// Every configuration concern the server needs at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub password: PasswordConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup),
            password: PasswordConfig::from_lookup(&lookup)?,
            logging: LoggingConfig::from_lookup(&lookup),
            metrics: MetricsConfig::from_lookup(&lookup)?,
        })
    }
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Reads `key`, falling back to `default` when unset or blank.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| {
        owned
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_with_only_database_url() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/cb")]))
                .unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.password.hash_cost, 10);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.metrics.port.is_none());
    }

    #[test]
    fn missing_database_url_fails() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }
}
