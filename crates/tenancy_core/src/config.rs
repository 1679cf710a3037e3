//! Process configuration read from the environment.
//!
//! | Variable            | Meaning                               | Default              |
//! |---------------------|---------------------------------------|----------------------|
//! | `TENANCY_DB_PATH`   | SQLite file path                      | in-memory database   |
//! | `TENANCY_LOG_LEVEL` | trace, debug, info, warn, error       | by build mode        |
//! | `TENANCY_LOG_DIR`   | absolute directory for rolling logs   | logging disabled     |
//!
//! Loading `.env` files is left to the binary.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "TENANCY_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "TENANCY_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "TENANCY_LOG_DIR";

/// Top-level configuration for the tenancy core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    pub logging: LoggingConfig,
}

/// Rolling file logger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Normalized level name.
    pub level: &'static str,
    /// `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let db_path = read(DB_PATH_VAR).map(PathBuf::from);

        let level = match read(LOG_LEVEL_VAR) {
            Some(value) => normalize_level(&value).map_err(|_| ConfigError::InvalidLogLevel(value))?,
            None => default_log_level(),
        };

        let log_dir = match read(LOG_DIR_VAR) {
            Some(value) => {
                Some(normalize_log_dir(&value).map_err(|_| ConfigError::InvalidLogDir(value))?)
            }
            None => None,
        };

        Ok(Self {
            db_path,
            logging: LoggingConfig { level, log_dir },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => write!(
                f,
                "{LOG_LEVEL_VAR} must be one of trace|debug|info|warn|error, got `{value}`"
            ),
            Self::InvalidLogDir(value) => {
                write!(f, "{LOG_DIR_VAR} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}
