use crate::env_lookup;

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `coursebook=debug,tower_http=info`.
    pub level: String,
    pub dir: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            dir: lookup("LOG_DIR").unwrap_or_else(|| "storage/logs".to_string()),
        }
    }
}
