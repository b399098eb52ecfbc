//! Route handlers.
//!
//! Handlers stay thin: parse the path or body, call the service, and let
//! [`ApiError`] pick the status code.

use super::{ApiError, AppState};
use crate::domain::AgendaId;
use crate::error::ServiceError;
use crate::metrics::MetricsSummary;
use crate::models::{Agenda, NewAgenda};
use crate::view::render_index;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Path ids that are not `[0-9]+` name no resource.
fn parse_id(raw: &str) -> Result<AgendaId, ApiError> {
    raw.parse::<AgendaId>().map_err(|_| ApiError::NotFound)
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsSummary> {
    Json(state.metrics.summary())
}

/// GET /, the server-rendered directory listing.
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let list = state
        .list_producer
        .agenda_list()
        .await
        .map_err(ServiceError::from)?;
    Ok(Html(render_index(&list)))
}

/// GET /agenda
pub async fn list_all_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Agenda>>, ApiError> {
    Ok(Json(state.service.list_all().await?))
}

/// GET /agenda/{id}
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Agenda>, ApiError> {
    let id = parse_id(&raw_id)?;
    Ok(Json(state.service.lookup(id).await?))
}

/// POST /agenda
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewAgenda>, JsonRejection>,
) -> Result<Json<Agenda>, ApiError> {
    let Json(payload) = payload?;
    Ok(Json(state.service.register(payload).await?))
}

/// GET /agenda/remove/{id}
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    state.service.remove(id).await?;
    Ok(StatusCode::OK)
}
