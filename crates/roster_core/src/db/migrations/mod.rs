//! Roster schema migrations.
//!
//! # Invariants
//! - `version` values are strictly increasing, starting at 1.
//! - Every pending step runs inside one transaction together with its
//!   `PRAGMA user_version` bump; the first failing step aborts the rest.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const ROSTER_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_roster.sql"),
}];

/// Returns the newest roster schema version this binary can produce.
pub fn latest_version() -> u32 {
    newest(ROSTER_MIGRATIONS)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file is newer than this binary.
/// - `DbError::Migration` naming the step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    run_migrations(conn, ROSTER_MIGRATIONS)
}

/// Reads `PRAGMA user_version` from `conn`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn newest(steps: &[Migration]) -> u32 {
    steps.last().map_or(0, |step| step.version)
}

fn run_migrations(conn: &mut Connection, steps: &[Migration]) -> DbResult<()> {
    let from = current_user_version(conn)?;
    let to = newest(steps);
    if from > to {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }

    let pending: Vec<&Migration> = steps.iter().filter(|step| step.version > from).collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        let bump = format!("PRAGMA user_version = {};", step.version);
        tx.execute_batch(step.sql)
            .and_then(|()| tx.execute_batch(&bump))
            .map_err(|source| DbError::Migration {
                version: step.version,
                source,
            })?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
    Ok(())
}
