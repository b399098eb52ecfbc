//! Connection bootstrap utilities for SQLite.

use super::migrations::apply_migrations;
use crate::error::StoreResult;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Opens a SQLite database file and applies all pending migrations.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(mode = "file", path = %path.display(), "opening database");

    let conn = Connection::open(path).map_err(|err| {
        error!(
            mode = "file",
            duration_ms = started_at.elapsed().as_millis() as u64,
            error = %err,
            "database open failed"
        );
        err
    })?;

    finish_open(conn, "file", started_at)
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> StoreResult<Connection> {
    let started_at = Instant::now();
    info!(mode = "memory", "opening database");

    let conn = Connection::open_in_memory()?;
    finish_open(conn, "memory", started_at)
}

fn finish_open(
    mut conn: Connection,
    mode: &'static str,
    started_at: Instant,
) -> StoreResult<Connection> {
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                mode,
                duration_ms = started_at.elapsed().as_millis() as u64,
                "database ready"
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                mode,
                duration_ms = started_at.elapsed().as_millis() as u64,
                error = %err,
                "database bootstrap failed"
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
