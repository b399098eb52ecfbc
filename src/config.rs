//! Configuration management for the Agenda server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file in the working directory is honoured if present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Database path that selects an in-memory SQLite database.
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Configuration for the Agenda server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP server binds to (default: 127.0.0.1:8080)
    pub bind_addr: SocketAddr,

    /// SQLite database file, or `:memory:` (default: agenda.db)
    pub database_path: PathBuf,

    /// How long the rendered list page may reuse a loaded list, in seconds (default: 30)
    pub list_cache_ttl_secs: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `AGENDA_BIND_ADDR`: listen address (default: 127.0.0.1:8080)
    /// - `AGENDA_DATABASE_PATH`: SQLite path (default: agenda.db)
    /// - `AGENDA_LIST_CACHE_TTL_SECS`: list page cache TTL (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let bind_addr = match env::var("AGENDA_BIND_ADDR") {
            Ok(val) => val
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "AGENDA_BIND_ADDR".to_string(),
                    reason: format!("Must be a socket address like 127.0.0.1:8080, got: {}", val),
                })?,
            Err(_) => defaults.bind_addr,
        };

        let database_path = match env::var("AGENDA_DATABASE_PATH") {
            Ok(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "AGENDA_DATABASE_PATH".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            Ok(val) => PathBuf::from(val),
            Err(_) => defaults.database_path,
        };

        let list_cache_ttl_secs =
            Self::parse_env_u64("AGENDA_LIST_CACHE_TTL_SECS", defaults.list_cache_ttl_secs)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            bind_addr,
            database_path,
            list_cache_ttl_secs,
            log_level,
        })
    }

    /// Whether the configured database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_DATABASE
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_path: PathBuf::from("agenda.db"),
            list_cache_ttl_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_path, PathBuf::from("agenda.db"));
        assert_eq!(config.list_cache_ttl_secs, 30);
        assert!(!config.is_in_memory());
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("AGENDA_BIND_ADDR", "0.0.0.0:9000");
        guard.set("AGENDA_DATABASE_PATH", ":memory:");
        guard.set("AGENDA_LIST_CACHE_TTL_SECS", "5");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert!(config.is_in_memory());
        assert_eq!(config.list_cache_ttl_secs, 5);
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_bind_addr() {
        let mut guard = EnvGuard::new();
        guard.set("AGENDA_BIND_ADDR", "not-an-address");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "AGENDA_BIND_ADDR"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_database_path() {
        let mut guard = EnvGuard::new();
        guard.set("AGENDA_DATABASE_PATH", "   ");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "AGENDA_DATABASE_PATH"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_AGENDA_U64", "42");

        assert_eq!(Config::parse_env_u64("TEST_AGENDA_U64", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u64("NONEXISTENT_AGENDA_VAR", 10).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_AGENDA_U64_INVALID", "not-a-number");

        assert!(Config::parse_env_u64("TEST_AGENDA_U64_INVALID", 10).is_err());
    }
}
