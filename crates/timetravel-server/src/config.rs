//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `TIMETRAVEL_DB_PATH` | `timetravel.db` |
//! | `TIMETRAVEL_PORT` | `3000` |
//! | `TIMETRAVEL_STORE_NAME` | `default_store_name` |
//! | `TIMETRAVEL_DB_VERSION` | `1` |
//! | `TIMETRAVEL_EDIT_POLICY` | `transient` |

use std::path::PathBuf;

use thiserror::Error;

use timetravel_core::DraftPolicy;
use timetravel_storage::{StoreConfig, DEFAULT_STORE_NAME, DEFAULT_STORE_VERSION};

pub const ENV_DB_PATH: &str = "TIMETRAVEL_DB_PATH";
pub const ENV_PORT: &str = "TIMETRAVEL_PORT";
pub const ENV_STORE_NAME: &str = "TIMETRAVEL_STORE_NAME";
pub const ENV_DB_VERSION: &str = "TIMETRAVEL_DB_VERSION";
pub const ENV_EDIT_POLICY: &str = "TIMETRAVEL_EDIT_POLICY";

const DEFAULT_DB_PATH: &str = "timetravel.db";
const DEFAULT_PORT: u16 = 3000;

/// A configuration value could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub port: u16,
    pub store: StoreConfig,
    pub edit_policy: DraftPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            port: DEFAULT_PORT,
            store: StoreConfig::default(),
            edit_policy: DraftPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset or blank keys take their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = get(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let port = match get(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError {
                var: ENV_PORT,
                reason: format!("'{}': {}", raw, e),
            })?,
            None => DEFAULT_PORT,
        };

        let store_name = get(ENV_STORE_NAME).unwrap_or_else(|| DEFAULT_STORE_NAME.to_string());

        let version = match get(ENV_DB_VERSION) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(v) if v > 0 => v,
                Ok(_) => {
                    return Err(ConfigError {
                        var: ENV_DB_VERSION,
                        reason: "version must be at least 1".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError {
                        var: ENV_DB_VERSION,
                        reason: format!("'{}': {}", raw, e),
                    })
                }
            },
            None => DEFAULT_STORE_VERSION,
        };

        let edit_policy = match get(ENV_EDIT_POLICY) {
            Some(raw) => raw.parse::<DraftPolicy>().map_err(|reason| ConfigError {
                var: ENV_EDIT_POLICY,
                reason,
            })?,
            None => DraftPolicy::default(),
        };

        Ok(ServerConfig {
            db_path,
            port,
            store: StoreConfig::new(store_name, version),
            edit_policy,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
