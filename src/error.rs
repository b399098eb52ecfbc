//! Error types for the Agenda server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Each layer owns its own enum; the HTTP layer maps them to responses in
//! [`crate::server::ApiError`].

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by the storage layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying SQLite failure
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The on-disk schema was written by a newer binary
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },

    /// Existing rows violate a constraint a pending migration adds
    #[error("cannot apply migration {version}: morada registered more than once: {}", .moradas.join(", "))]
    DuplicateMoradasBlockMigration { version: u32, moradas: Vec<String> },

    /// No row with the given id
    #[error("agenda {0} not found")]
    NotFound(i64),

    /// The unique index on `morada` rejected an insert
    #[error("morada already registered: {0}")]
    DuplicateMorada(String),

    /// The shared connection lock was poisoned by a panicking writer
    #[error("database connection lock poisoned")]
    LockPoisoned,

    /// The blocking task running the query failed to complete
    #[error("task join error: {0}")]
    Join(String),
}

/// Errors returned by the agenda service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// One or more fields failed validation, keyed by field name
    #[error("validation failed: {} violation(s)", .0.len())]
    Validation(BTreeMap<String, String>),

    /// Uniqueness rule on a field was violated
    #[error("{field}: {message}")]
    Conflict { field: String, message: String },

    /// No record with the given id
    #[error("agenda {0} not found")]
    NotFound(i64),

    /// Anything else, reported with its message
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ServiceError::NotFound(id),
            StoreError::DuplicateMorada(_) => ServiceError::Conflict {
                field: "morada".to_string(),
                message: "Morada taken".to_string(),
            },
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors returned by [`crate::client::AgendaClient`].
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Server answered 404
    #[error("Resource not found")]
    NotFound,

    /// Server answered 400 with a field map
    #[error("Validation failed: {0:?}")]
    Validation(BTreeMap<String, String>),

    /// Server answered 409 with a field map
    #[error("Conflict: {0:?}")]
    Conflict(BTreeMap<String, String>),

    /// Any other non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ClientError
pub type ClientResult<T> = Result<T, ClientError>;
