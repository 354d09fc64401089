//! API configuration module.
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! read first by `main`) with fallback to local-development defaults.
//!
//! | Variable        | Default     | Notes                                  |
//! |-----------------|-------------|----------------------------------------|
//! | `DB_CONNECTION` | `postgres`  | `postgres` or `sqlite`                 |
//! | `DB_HOST`       | `localhost` | Postgres only                          |
//! | `DB_PORT`       | `5432`      | Postgres only                          |
//! | `DB_USERNAME`   | `postgres`  | Postgres only                          |
//! | `DB_PASSWORD`   | (empty)     | Postgres only                          |
//! | `DB_DATABASE`   | `laundry`   | Database name, or file path for SQLite |

use std::env;
use std::net::{Ipv4Addr, SocketAddr};

use laundry_db::{DbConfig, Driver};

/// The service always listens here.
pub const LISTEN_PORT: u16 = 8080;

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// SQL backend (`DB_CONNECTION`).
    pub db_connection: Driver,

    /// Database host.
    pub db_host: String,

    /// Database port.
    pub db_port: u16,

    /// Database user.
    pub db_username: String,

    /// Database password.
    pub db_password: String,

    /// Database name (Postgres) or file path (SQLite, `:memory:` allowed).
    pub db_database: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let db_connection: Driver = var("DB_CONNECTION", "postgres")
            .parse()
            .map_err(|_| ConfigError::UnsupportedDriver(var("DB_CONNECTION", "postgres")))?;

        let db_port: u16 = var("DB_PORT", "5432")
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DB_PORT".to_string()))?;

        Ok(ApiConfig {
            db_connection,
            db_host: var("DB_HOST", "localhost"),
            db_port,
            db_username: var("DB_USERNAME", "postgres"),
            db_password: lookup("DB_PASSWORD").unwrap_or_default(),
            db_database: var("DB_DATABASE", "laundry"),
        })
    }

    /// Builds the pool configuration for the selected driver.
    pub fn db_config(&self) -> Result<DbConfig, ConfigError> {
        match self.db_connection {
            Driver::Postgres => DbConfig::postgres(
                &self.db_host,
                self.db_port,
                &self.db_username,
                &self.db_password,
                &self.db_database,
            )
            .map_err(|e| ConfigError::InvalidValue(e.to_string())),
            Driver::Sqlite if self.db_database == ":memory:" => Ok(DbConfig::in_memory()),
            Driver::Sqlite => Ok(DbConfig::sqlite(&self.db_database)),
        }
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, LISTEN_PORT))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Unsupported DB_CONNECTION: {0}")]
    UnsupportedDriver(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.db_connection, Driver::Postgres);
        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 5432);
        assert_eq!(config.listen_addr().port(), 8080);

        let db = config.db_config().unwrap();
        assert_eq!(db.url, "postgres://postgres@localhost:5432/laundry");
    }

    #[test]
    fn test_sqlite_selection() {
        let config = load(&[("DB_CONNECTION", "sqlite"), ("DB_DATABASE", "./laundry.db")]).unwrap();
        let db = config.db_config().unwrap();
        assert_eq!(db.driver, Driver::Sqlite);
        assert_eq!(db.url, "sqlite://./laundry.db?mode=rwc");

        let config = load(&[("DB_CONNECTION", "sqlite"), ("DB_DATABASE", ":memory:")]).unwrap();
        assert_eq!(config.db_config().unwrap().max_connections, 1);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("DB_PORT", "five")]),
            Err(ConfigError::InvalidValue(key)) if key == "DB_PORT"
        ));
        assert!(matches!(
            load(&[("DB_CONNECTION", "oracle")]),
            Err(ConfigError::UnsupportedDriver(_))
        ));
    }
}
