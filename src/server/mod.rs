//! HTTP server for the agenda directory.
//!
//! Routes, request tracking middleware and the serve loop. Handlers live in
//! [`handlers`]; error-to-response mapping in [`api_error`].

pub mod api_error;
pub mod handlers;

pub use api_error::ApiError;

use crate::metrics::Metrics;
use crate::services::AgendaService;
use crate::view::AgendaListProducer;
use anyhow::Result;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn AgendaService>,
    pub list_producer: AgendaListProducer,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        service: Arc<dyn AgendaService>,
        list_producer: AgendaListProducer,
        metrics: Metrics,
    ) -> Self {
        Self {
            service,
            list_producer,
            metrics,
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .route(
            "/agenda",
            get(handlers::list_all_handler).post(handlers::create_handler),
        )
        .route("/agenda/:id", get(handlers::lookup_handler))
        .route("/agenda/remove/:id", get(handlers::remove_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            track_requests,
        ))
        .with_state(state)
}

async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let timer = state.metrics.start_request();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed = timer.finish(status.is_client_error() || status.is_server_error());

    debug!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = elapsed.as_millis() as u64,
        "request completed"
    );
    response
}

/// Serve the router on an already bound listener until Ctrl-C.
pub async fn run_server(listener: TcpListener, state: AppState) -> Result<()> {
    let app = build_router(state);
    info!(addr = %listener.local_addr()?, "agenda server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
