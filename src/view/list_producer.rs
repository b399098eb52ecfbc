//! Cached, morada-ordered listing for the UI page.

use crate::cache::TimedSnapshot;
use crate::error::StoreResult;
use crate::models::Agenda;
use crate::repositories::AgendaRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Produces the directory listing shown by the list page.
///
/// The listing is loaded from the repository ordered by morada and reused
/// until its TTL runs out or the service reports a change.
#[derive(Clone)]
pub struct AgendaListProducer {
    repository: Arc<dyn AgendaRepository>,
    snapshot: TimedSnapshot<Arc<Vec<Agenda>>>,
}

impl AgendaListProducer {
    pub fn new(repository: Arc<dyn AgendaRepository>, ttl: Duration) -> Self {
        Self {
            repository,
            snapshot: TimedSnapshot::new(ttl),
        }
    }

    /// The current listing, loading it if the snapshot is empty or stale.
    pub async fn agenda_list(&self) -> StoreResult<Arc<Vec<Agenda>>> {
        if let Some(list) = self.snapshot.get() {
            debug!(count = list.len(), "agenda list served from snapshot");
            return Ok(list);
        }
        self.retrieve_all_ordered_by_morada().await
    }

    /// Reload the listing from the repository unconditionally.
    ///
    /// A reload that raced with a change notification still returns what it
    /// read, but does not replace the snapshot.
    pub async fn retrieve_all_ordered_by_morada(&self) -> StoreResult<Arc<Vec<Agenda>>> {
        let generation = self.snapshot.generation();
        let list = Arc::new(self.repository.find_all_ordered_by_morada().await?);
        if self.snapshot.store_if_generation(generation, list.clone()) {
            debug!(count = list.len(), "agenda list reloaded");
        } else {
            debug!(count = list.len(), "agenda list changed during reload, not cached");
        }
        Ok(list)
    }

    /// Called after a record was registered.
    pub fn on_agenda_list_changed(&self) {
        self.snapshot.invalidate();
    }

    /// Drop one record from the held listing without a reload.
    ///
    /// A no-op when nothing fresh is held; the next read reloads anyway.
    pub fn remove_elemento(&self, elemento: &Agenda) {
        self.snapshot.update(|list| {
            Arc::make_mut(list).retain(|held| held != elemento);
        });
    }
}

impl std::fmt::Debug for AgendaListProducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgendaListProducer")
            .field("snapshot", &self.snapshot)
            .finish()
    }
}
