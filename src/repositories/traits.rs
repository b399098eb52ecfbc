use crate::domain::AgendaId;
use crate::error::StoreResult;
use crate::models::{Agenda, ValidatedAgenda};
use async_trait::async_trait;

/// Repository for agenda records.
///
/// Provides abstraction over record storage and retrieval, enabling
/// different implementations (SQLite, in-memory mocks for tests).
#[async_trait]
pub trait AgendaRepository: Send + Sync {
    /// Retrieve a single record by id, or `None` if absent.
    async fn find_by_id(&self, id: AgendaId) -> StoreResult<Option<Agenda>>;

    /// Retrieve the record whose morada matches exactly, or `None`.
    async fn find_by_morada(&self, morada: &str) -> StoreResult<Option<Agenda>>;

    /// Retrieve every record, ascending by morada.
    async fn find_all_ordered_by_morada(&self) -> StoreResult<Vec<Agenda>>;

    /// Insert a new record; the store assigns its id.
    ///
    /// Fails with `StoreError::DuplicateMorada` if the morada is taken.
    async fn create(&self, agenda: &ValidatedAgenda) -> StoreResult<Agenda>;

    /// Delete a record; fails with `StoreError::NotFound` if absent.
    async fn remove_by_id(&self, id: AgendaId) -> StoreResult<()>;
}
