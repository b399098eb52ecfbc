//! Agenda Server - Main entry point
//!
//! Loads configuration, opens the SQLite database and serves the REST API
//! until Ctrl-C.

use agenda_server::db::{open_db, open_db_in_memory};
use agenda_server::{build_state, Config};
use anyhow::Result;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        database = %config.database_path.display(),
        list_cache_ttl_secs = config.list_cache_ttl_secs,
        "Starting Agenda server"
    );

    let conn = if config.is_in_memory() {
        open_db_in_memory()
    } else {
        open_db(&config.database_path)
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let state = build_state(conn, Duration::from_secs(config.list_cache_ttl_secs));
    let listener = TcpListener::bind(config.bind_addr).await?;

    agenda_server::server::run_server(listener, state).await?;

    info!("Agenda server shutdown complete");
    Ok(())
}
