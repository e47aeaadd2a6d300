use crate::{ConfigError, env_lookup};

#[derive(Clone, Debug, Default)]
pub struct MetricsConfig {
    /// Port for the Prometheus listener; metrics are disabled when unset.
    pub port: Option<u16>,
}

impl MetricsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("METRICS_PORT").map(|v| v.trim().to_string()) {
            Some(value) if !value.is_empty() => Some(value.parse().map_err(|_| {
                ConfigError::Invalid {
                    key: "METRICS_PORT",
                    value,
                }
            })?),
            _ => None,
        };
        Ok(Self { port })
    }

    pub fn enabled(&self) -> bool {
        self.port.is_some()
    }
}
