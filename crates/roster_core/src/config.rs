//! Runtime configuration for roster binaries.
//!
//! Values come from the process environment only; every variable is
//! optional and no dotenv file is read.
//!
//! | Variable           | Meaning                               | Default                 |
//! |--------------------|---------------------------------------|-------------------------|
//! | `ROSTER_DB_PATH`   | SQLite database file                  | `roster.sqlite3`        |
//! | `ROSTER_LOG_LEVEL` | `trace`/`debug`/`info`/`warn`/`error` | per build mode          |
//! | `ROSTER_LOG_DIR`   | absolute directory for rolling logs   | unset: logging disabled |

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "ROSTER_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "ROSTER_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ROSTER_LOG_DIR";

const DEFAULT_DB_PATH: &str = "roster.sqlite3";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.variable, self.message)
    }
}

impl Error for ConfigError {}

/// Resolved settings for opening the store and starting logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl RosterConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = read(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path.trim());
        }
        if let Some(level) = read(LOG_LEVEL_VAR) {
            config.log_level = normalize_level(&level).map_err(|message| ConfigError {
                variable: LOG_LEVEL_VAR,
                message,
            })?;
        }
        if let Some(dir) = read(LOG_DIR_VAR) {
            config.log_dir = Some(normalize_log_dir(&dir).map_err(|message| ConfigError {
                variable: LOG_DIR_VAR,
                message,
            })?);
        }

        Ok(config)
    }
}
