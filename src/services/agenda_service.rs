//! Agenda service layer.
//!
//! Registration, removal and lookup with the directory's uniqueness rule.

use crate::domain::AgendaId;
use crate::error::{ServiceError, ServiceResult};
use crate::metrics::Metrics;
use crate::models::{Agenda, NewAgenda};
use crate::repositories::AgendaRepository;
use crate::view::AgendaListProducer;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

const MORADA_TAKEN: &str = "Morada taken";
const MORADA_MISSING: &str = "Morada doesn't exist";

/// Agenda service trait for business operations.
#[async_trait]
pub trait AgendaService: Send + Sync {
    /// Every record, ordered by morada.
    async fn list_all(&self) -> ServiceResult<Vec<Agenda>>;

    /// One record by id.
    async fn lookup(&self, id: AgendaId) -> ServiceResult<Agenda>;

    /// Validate and store a new record.
    ///
    /// Fails with `Validation` listing each bad field, or `Conflict` if the
    /// morada is already registered.
    async fn register(&self, payload: NewAgenda) -> ServiceResult<Agenda>;

    /// Delete a record by id.
    async fn remove(&self, id: AgendaId) -> ServiceResult<()>;
}

/// Default implementation of AgendaService.
pub struct AgendaServiceImpl {
    repository: Arc<dyn AgendaRepository>,
    list_producer: AgendaListProducer,
    metrics: Metrics,
}

impl AgendaServiceImpl {
    pub fn new(
        repository: Arc<dyn AgendaRepository>,
        list_producer: AgendaListProducer,
        metrics: Metrics,
    ) -> Self {
        Self {
            repository,
            list_producer,
            metrics,
        }
    }

    async fn morada_already_exists(&self, morada: &str) -> ServiceResult<bool> {
        Ok(self.repository.find_by_morada(morada).await?.is_some())
    }

    fn conflict(&self, message: &str) -> ServiceError {
        self.metrics.record_conflict();
        ServiceError::Conflict {
            field: "morada".to_string(),
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl AgendaService for AgendaServiceImpl {
    async fn list_all(&self) -> ServiceResult<Vec<Agenda>> {
        Ok(self.repository.find_all_ordered_by_morada().await?)
    }

    async fn lookup(&self, id: AgendaId) -> ServiceResult<Agenda> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id.get()))
    }

    async fn register(&self, payload: NewAgenda) -> ServiceResult<Agenda> {
        let validated = payload.validate().map_err(|violations| {
            debug!(violations = violations.len(), "registration failed validation");
            ServiceError::Validation(violations)
        })?;

        if self.morada_already_exists(validated.morada.as_str()).await? {
            warn!(morada = %validated.morada, "registration rejected, morada taken");
            return Err(self.conflict(MORADA_TAKEN));
        }

        // The unique index still guards the window between the check and the insert.
        let created = match self.repository.create(&validated).await {
            Ok(created) => created,
            Err(err) => {
                let err = ServiceError::from(err);
                if matches!(err, ServiceError::Conflict { .. }) {
                    warn!(morada = %validated.morada, "registration lost insert race");
                    self.metrics.record_conflict();
                }
                return Err(err);
            }
        };

        info!(id = created.id, morada = %created.morada, "registered agenda");
        self.metrics.record_agenda_created();
        self.list_producer.on_agenda_list_changed();
        Ok(created)
    }

    async fn remove(&self, id: AgendaId) -> ServiceResult<()> {
        let elemento = self.lookup(id).await?;

        elemento.validate().map_err(ServiceError::Validation)?;

        if !self.morada_already_exists(&elemento.morada).await? {
            return Err(self.conflict(MORADA_MISSING));
        }

        self.repository.remove_by_id(id).await?;

        info!(id = elemento.id, morada = %elemento.morada, "removed agenda");
        self.metrics.record_agenda_removed();
        self.list_producer.remove_elemento(&elemento);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_db_in_memory;
    use crate::repositories::SqliteAgendaRepository;
    use std::time::Duration;

    fn service() -> (AgendaServiceImpl, Metrics) {
        let repo: Arc<dyn AgendaRepository> =
            Arc::new(SqliteAgendaRepository::new(open_db_in_memory().unwrap()));
        let producer = AgendaListProducer::new(repo.clone(), Duration::from_secs(60));
        let metrics = Metrics::new();
        (
            AgendaServiceImpl::new(repo, producer, metrics.clone()),
            metrics,
        )
    }

    #[tokio::test]
    async fn test_register_then_lookup() {
        let (service, metrics) = service();
        let created = service
            .register(NewAgenda::new("Rua A", "912"))
            .await
            .unwrap();

        let found = service
            .lookup(AgendaId::new(created.id).unwrap())
            .await
            .unwrap();
        assert_eq!(found.morada, "Rua A");
        assert_eq!(found.numbers, "912");
        assert_eq!(metrics.summary().agendas_created_total, 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_morada_conflicts() {
        let (service, metrics) = service();
        service.register(NewAgenda::new("Rua A", "1")).await.unwrap();

        let err = service
            .register(NewAgenda::new("Rua A", "2"))
            .await
            .unwrap_err();
        match err {
            ServiceError::Conflict { field, message } => {
                assert_eq!(field, "morada");
                assert_eq!(message, "Morada taken");
            }
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(metrics.summary().conflicts_total, 1);
    }

    #[tokio::test]
    async fn test_register_validation_runs_before_uniqueness() {
        let (service, _) = service();
        let err = service
            .register(NewAgenda {
                morada: Some(String::new()),
                numbers: None,
            })
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(map) => {
                assert_eq!(map["morada"], "may not be empty");
                assert_eq!(map["numbers"], "may not be null");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_remove_deletes_record() {
        let (service, metrics) = service();
        let created = service.register(NewAgenda::new("Rua A", "1")).await.unwrap();
        let id = AgendaId::new(created.id).unwrap();

        service.remove(id).await.unwrap();
        assert!(matches!(
            service.lookup(id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            service.remove(id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert_eq!(metrics.summary().agendas_removed_total, 1);
    }

    #[tokio::test]
    async fn test_list_all_ordered() {
        let (service, _) = service();
        service.register(NewAgenda::new("Rua Z", "1")).await.unwrap();
        service.register(NewAgenda::new("Rua M", "1")).await.unwrap();

        let list = service.list_all().await.unwrap();
        assert_eq!(list[0].morada, "Rua M");
        assert_eq!(list[1].morada, "Rua Z");
    }

    #[tokio::test]
    async fn test_morada_freed_after_remove() {
        let (service, _) = service();
        let created = service.register(NewAgenda::new("Rua A", "1")).await.unwrap();
        service
            .remove(AgendaId::new(created.id).unwrap())
            .await
            .unwrap();

        assert!(service.register(NewAgenda::new("Rua A", "2")).await.is_ok());
    }
}
