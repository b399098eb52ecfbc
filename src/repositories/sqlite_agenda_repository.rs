use crate::domain::AgendaId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Agenda, ValidatedAgenda};
use crate::repositories::traits::AgendaRepository;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

/// Agenda repository backed by a single SQLite connection.
///
/// `rusqlite` is synchronous, so every call is moved onto tokio's blocking
/// pool with `spawn_blocking`; the connection itself is shared behind a
/// mutex and the async runtime never waits on disk I/O.
#[derive(Clone)]
pub struct SqliteAgendaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAgendaRepository {
    /// Wrap a migrated connection (see [`crate::db::open_db`]).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::LockPoisoned)?;
            op(&guard)
        })
        .await
        .map_err(|e| StoreError::Join(e.to_string()))?
    }
}

fn row_to_agenda(row: &Row<'_>) -> rusqlite::Result<Agenda> {
    Ok(Agenda {
        id: row.get("id")?,
        morada: row.get("morada")?,
        numbers: row.get("numbers")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[async_trait]
impl AgendaRepository for SqliteAgendaRepository {
    async fn find_by_id(&self, id: AgendaId) -> StoreResult<Option<Agenda>> {
        self.run(move |conn| {
            let found = conn
                .query_row(
                    "SELECT id, morada, numbers FROM agenda WHERE id = ?1;",
                    [id.get()],
                    row_to_agenda,
                )
                .optional()?;
            Ok(found)
        })
        .await
    }

    async fn find_by_morada(&self, morada: &str) -> StoreResult<Option<Agenda>> {
        let morada = morada.to_string();
        self.run(move |conn| {
            let found = conn
                .query_row(
                    "SELECT id, morada, numbers FROM agenda WHERE morada = ?1;",
                    [morada.as_str()],
                    row_to_agenda,
                )
                .optional()?;
            Ok(found)
        })
        .await
    }

    async fn find_all_ordered_by_morada(&self) -> StoreResult<Vec<Agenda>> {
        self.run(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, morada, numbers FROM agenda ORDER BY morada ASC, id ASC;")?;
            let rows = stmt.query_map([], row_to_agenda)?;
            let mut agendas = Vec::new();
            for row in rows {
                agendas.push(row?);
            }
            Ok(agendas)
        })
        .await
    }

    async fn create(&self, agenda: &ValidatedAgenda) -> StoreResult<Agenda> {
        let morada = agenda.morada.as_str().to_string();
        let numbers = agenda.numbers.as_str().to_string();
        self.run(move |conn| {
            match conn.execute(
                "INSERT INTO agenda (morada, numbers) VALUES (?1, ?2);",
                params![morada, numbers],
            ) {
                Ok(_) => {}
                Err(err) if is_unique_violation(&err) => {
                    return Err(StoreError::DuplicateMorada(morada));
                }
                Err(err) => return Err(err.into()),
            }

            let id = conn.last_insert_rowid();
            tracing::debug!(id, morada = %morada, "inserted agenda row");
            Ok(Agenda::new(id, morada, numbers))
        })
        .await
    }

    async fn remove_by_id(&self, id: AgendaId) -> StoreResult<()> {
        self.run(move |conn| {
            let changed = conn.execute("DELETE FROM agenda WHERE id = ?1;", [id.get()])?;
            if changed == 0 {
                return Err(StoreError::NotFound(id.get()));
            }
            Ok(())
        })
        .await
    }
}
