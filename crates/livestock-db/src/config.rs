//! Layered configuration for the database connection and pool.
//!
//! Settings load from an optional YAML file, then environment variables
//! override any field they name, with hardcoded defaults as the last
//! resort — a partial or entirely absent file still produces a workable
//! configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::DbError;

/// Top-level application configuration.
///
/// Mirrors the structure of an optional `livestock.yaml` file. All fields
/// have defaults, so an empty document parses successfully.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Database connection and pool settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a YAML file at `path`, then applies
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, DbError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DbError::Config(format!("failed to read config file: {e}")))?;
        let mut config = Self::parse(&contents)?;
        config.database.apply_env_overrides();
        Ok(config)
    }

    /// Parses configuration from a YAML string, then applies
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the content is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, DbError> {
        let mut config: Self = serde_yml::from_str(yaml)
            .map_err(|e| DbError::Config(format!("failed to parse config YAML: {e}")))?;
        config.database.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration the way the CLI does: `path` if given and
    /// present, otherwise hardcoded defaults, with environment-variable
    /// overrides applied either way.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if `path` is given but cannot be read or
    /// parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, DbError> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                let mut config = Self::default();
                config.database.apply_env_overrides();
                Ok(config)
            }
        }
    }
}

/// Database connection and pool tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Idle connection timeout, in seconds.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Overrides fields with environment variables when set, letting a
    /// deployment wire connection strings without touching the YAML file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DATABASE_URL") {
            self.url = val;
        }
        if let Ok(val) = std::env::var("DATABASE_MAX_CONNECTIONS") {
            if let Ok(parsed) = val.parse() {
                self.max_connections = parsed;
            }
        }
        if let Ok(val) = std::env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            if let Ok(parsed) = val.parse() {
                self.connect_timeout_secs = parsed;
            }
        }
        if let Ok(val) = std::env::var("DATABASE_IDLE_TIMEOUT_SECS") {
            if let Ok(parsed) = val.parse() {
                self.idle_timeout_secs = parsed;
            }
        }
    }

    /// The configured connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// The configured idle timeout as a [`Duration`].
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `livestock_db=debug,info`.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_database_url() -> String {
    "postgresql://localhost:5432/livestock".to_owned()
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

const fn default_idle_timeout_secs() -> u64 {
    300
}

fn default_log_filter() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_parses_to_defaults() {
        let config = AppConfig::parse("").expect("empty YAML document parses");
        assert_eq!(config.database.max_connections, default_max_connections());
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn partial_document_keeps_remaining_defaults() {
        let yaml = "database:\n  max_connections: 25\n";
        let config = AppConfig::parse(yaml).expect("partial YAML document parses");
        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.database.url, default_database_url());
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = AppConfig::parse(":\n  - not: valid: yaml: [").unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }
}
