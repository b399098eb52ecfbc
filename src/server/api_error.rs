//! Mapping of service failures onto HTTP responses.
//!
//! Validation failures answer 400 with a field→message map, uniqueness
//! conflicts 409 with the same shape, unknown records 404 with an empty body,
//! and anything else 400 with `{"error": message}`.

use crate::error::ServiceError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// A failure reported by the service layer
    Service(ServiceError),

    /// The path did not name a record
    NotFound,

    /// The request body could not be read as the expected JSON
    BadBody { status: StatusCode, message: String },
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Only a wrong content type keeps its own status; every other body
        // problem is a plain bad request.
        let status = match rejection.status() {
            StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError::BadBody {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Service(ServiceError::Validation(violations)) => {
                debug!(
                    violations = violations.len(),
                    "validation completed, violations found"
                );
                (StatusCode::BAD_REQUEST, Json(violations)).into_response()
            }
            ApiError::Service(ServiceError::Conflict { field, message }) => {
                let body: BTreeMap<String, String> = BTreeMap::from([(field, message)]);
                (StatusCode::CONFLICT, Json(body)).into_response()
            }
            ApiError::Service(ServiceError::NotFound(_)) | ApiError::NotFound => {
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::Service(ServiceError::Internal(message)) => {
                error!(error = %message, "request failed");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::BadBody { status, message } => {
                (status, Json(json!({ "error": message }))).into_response()
            }
        }
    }
}
