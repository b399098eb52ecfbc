//! SQLite migration registry and executor.
//!
//! Versions must stay strictly increasing; the applied version is mirrored to
//! `PRAGMA user_version`.

use crate::error::{StoreError, StoreResult};
use rusqlite::Connection;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
    /// Runs inside the migration transaction before `sql`.
    precheck: Option<fn(&Connection, u32) -> StoreResult<()>>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: "CREATE TABLE agenda (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                morada  TEXT NOT NULL,
                numbers TEXT NOT NULL
              );",
        precheck: None,
    },
    Migration {
        version: 2,
        sql: "CREATE UNIQUE INDEX idx_agenda_morada ON agenda (morada);",
        precheck: Some(reject_duplicate_moradas),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        if let Some(precheck) = migration.precheck {
            precheck(&tx, migration.version)?;
        }
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        info!(version = migration.version, "applied migration");
    }
    tx.commit()?;

    Ok(())
}

/// Databases written before the unique index may hold the same morada twice;
/// those rows have to be merged by hand before the upgrade.
fn reject_duplicate_moradas(conn: &Connection, version: u32) -> StoreResult<()> {
    let mut stmt = conn.prepare(
        "SELECT morada FROM agenda GROUP BY morada HAVING COUNT(*) > 1 ORDER BY morada;",
    )?;
    let moradas = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if moradas.is_empty() {
        return Ok(());
    }
    warn!(version, duplicates = moradas.len(), "migration blocked by duplicate moradas");
    Err(StoreError::DuplicateMoradasBlockMigration { version, moradas })
}

/// Reads the schema version recorded in the database header.
pub fn current_user_version(conn: &Connection) -> StoreResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
