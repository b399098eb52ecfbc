use agenda_server::domain::AgendaId;
use agenda_server::error::{StoreError, StoreResult};
use agenda_server::models::{Agenda, ValidatedAgenda};
use agenda_server::repositories::AgendaRepository;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Holds one `find_all_ordered_by_morada` call between its read and its
/// return.
#[derive(Default)]
pub struct ListingGate {
    /// Signalled once the paused call has taken its copy of the records.
    pub read_done: Notify,
    /// Signal to let the paused call return.
    pub release: Notify,
}

/// Mock agenda repository for testing.
///
/// Keeps records in memory, tracks method calls for verification, and can be
/// told to hide records from `find_by_morada` to simulate a lost
/// check-then-insert race.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockAgendaRepository {
    agendas: Arc<Mutex<BTreeMap<i64, Agenda>>>,
    next_id: Arc<Mutex<i64>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    blind_morada_lookup: Arc<Mutex<bool>>,
    fail_with: Arc<Mutex<Option<String>>>,
    listing_gate: Arc<Mutex<Option<Arc<ListingGate>>>>,
}

#[allow(dead_code)]
impl MockAgendaRepository {
    /// Create a new empty MockAgendaRepository.
    pub fn new() -> Self {
        Self {
            agendas: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            blind_morada_lookup: Arc::new(Mutex::new(false)),
            fail_with: Arc::new(Mutex::new(None)),
            listing_gate: Arc::new(Mutex::new(None)),
        }
    }

    /// Insert a record as-is, bypassing validation.
    pub fn add_agenda(&self, agenda: Agenda) {
        let mut agendas = self.agendas.lock().unwrap();
        let mut next_id = self.next_id.lock().unwrap();
        *next_id = (*next_id).max(agenda.id + 1);
        agendas.insert(agenda.id, agenda);
    }

    /// Make `find_by_morada` report nothing, as if another writer had not
    /// committed yet.
    pub fn set_blind_morada_lookup(&self, blind: bool) {
        *self.blind_morada_lookup.lock().unwrap() = blind;
    }

    /// Make every call fail with a store error carrying `message`.
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    /// Pause the next `find_all_ordered_by_morada` call after it has read
    /// the records, until the returned gate is released.
    pub fn pause_next_listing(&self) -> Arc<ListingGate> {
        let gate = Arc::new(ListingGate::default());
        *self.listing_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn len(&self) -> usize {
        self.agendas.lock().unwrap().len()
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
        match self.fail_with.lock().unwrap().as_ref() {
            Some(message) => Err(StoreError::Join(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MockAgendaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgendaRepository for MockAgendaRepository {
    async fn find_by_id(&self, id: AgendaId) -> StoreResult<Option<Agenda>> {
        self.track_call("find_by_id")?;
        Ok(self.agendas.lock().unwrap().get(&id.get()).cloned())
    }

    async fn find_by_morada(&self, morada: &str) -> StoreResult<Option<Agenda>> {
        self.track_call("find_by_morada")?;
        if *self.blind_morada_lookup.lock().unwrap() {
            return Ok(None);
        }
        let agendas = self.agendas.lock().unwrap();
        Ok(agendas.values().find(|a| a.morada == morada).cloned())
    }

    async fn find_all_ordered_by_morada(&self) -> StoreResult<Vec<Agenda>> {
        self.track_call("find_all_ordered_by_morada")?;
        let mut all: Vec<Agenda> = self.agendas.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.morada.cmp(&b.morada).then(a.id.cmp(&b.id)));

        let gate = self.listing_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.read_done.notify_one();
            gate.release.notified().await;
        }
        Ok(all)
    }

    async fn create(&self, agenda: &ValidatedAgenda) -> StoreResult<Agenda> {
        self.track_call("create")?;

        let mut agendas = self.agendas.lock().unwrap();
        if agendas
            .values()
            .any(|a| a.morada == agenda.morada.as_str())
        {
            return Err(StoreError::DuplicateMorada(agenda.morada.to_string()));
        }

        let mut next_id = self.next_id.lock().unwrap();
        let created = Agenda::new(*next_id, agenda.morada.as_str(), agenda.numbers.as_str());
        *next_id += 1;
        agendas.insert(created.id, created.clone());
        Ok(created)
    }

    async fn remove_by_id(&self, id: AgendaId) -> StoreResult<()> {
        self.track_call("remove_by_id")?;
        match self.agendas.lock().unwrap().remove(&id.get()) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.get())),
        }
    }
}
