//! Agenda Server - a contact directory exposed over REST and backed by SQLite.
//!
//! Each directory entry ("agenda") pairs a unique address (`morada`) with a
//! free-form phone numbers field.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects for ids and mandatory fields
//! - **models**: The stored record and the create payload
//! - **db**: SQLite connection bootstrap and schema migrations
//! - **repositories**: Storage trait and its SQLite implementation
//! - **services**: Registration/removal rules, including morada uniqueness
//! - **view**: Cached listing and HTML rendering for the index page
//! - **server**: axum router, handlers and HTTP error mapping
//! - **client**: Blocking HTTP client for the REST API
//! - **cache**, **metrics**, **config**, **error**: supporting pieces

pub mod cache;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod view;

pub use cache::TimedSnapshot;
pub use client::AgendaClient;
pub use config::Config;
pub use error::{ClientError, ConfigError, ServiceError, StoreError};
pub use metrics::{Metrics, MetricsSummary, RequestTimer};
pub use models::{Agenda, NewAgenda};
pub use server::{build_router, AppState};
pub use services::{AgendaService, AgendaServiceImpl};
pub use view::AgendaListProducer;

use repositories::{AgendaRepository, SqliteAgendaRepository};
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Duration;

/// Wire repository, list producer, service and metrics around an open,
/// migrated connection.
pub fn build_state(conn: Connection, list_cache_ttl: Duration) -> AppState {
    let repository =
        Arc::new(SqliteAgendaRepository::new(conn)) as Arc<dyn AgendaRepository>;
    let list_producer = AgendaListProducer::new(repository.clone(), list_cache_ttl);
    let metrics = Metrics::new();
    let service = Arc::new(AgendaServiceImpl::new(
        repository,
        list_producer.clone(),
        metrics.clone(),
    )) as Arc<dyn AgendaService>;

    AppState::new(service, list_producer, metrics)
}
