//! SQLite storage bootstrap for the roster store.
//!
//! # Responsibility
//! - Open and configure SQLite connections.
//! - Bring the roster schema up to date before any repository is built.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No roster data is read or written before migrations succeed.
//! - A failed migration leaves the schema at its previous version.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Connection-level failure (open, pragma, version read).
    Sqlite(rusqlite::Error),
    /// Migration `version` failed; the enclosing transaction was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The roster file was written by a newer binary.
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Migration { version, source } => {
                write!(f, "roster migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "roster schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
