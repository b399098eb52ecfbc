//! HTTP client for the agenda REST API.
//!
//! A synchronous `ureq` client; call it from async code through
//! `tokio::task::spawn_blocking`.

use crate::error::{ClientError, ClientResult};
use crate::models::{Agenda, NewAgenda};
use std::collections::BTreeMap;
use std::time::Duration;

/// HTTP client for a running agenda server.
#[derive(Clone)]
pub struct AgendaClient {
    /// Base URL, e.g. `http://127.0.0.1:8080`
    base_url: String,

    agent: ureq::Agent,
}

impl AgendaClient {
    /// Create a client with a 10 second request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.into(),
            agent,
        }
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn get(&self, path: &str) -> ClientResult<ureq::Response> {
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);
        self.agent.get(&url).call().map_err(map_error)
    }

    fn read_json<T: serde::de::DeserializeOwned>(response: ureq::Response) -> ClientResult<T> {
        let body = response
            .into_string()
            .map_err(|e| ClientError::Http(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// List every record, ordered by morada.
    pub fn list(&self) -> ClientResult<Vec<Agenda>> {
        Self::read_json(self.get("/agenda")?)
    }

    /// Fetch one record by id.
    pub fn get_agenda(&self, id: i64) -> ClientResult<Agenda> {
        Self::read_json(self.get(&format!("/agenda/{}", id))?)
    }

    /// Register a new record and return it with its assigned id.
    pub fn create(&self, payload: &NewAgenda) -> ClientResult<Agenda> {
        let url = self.build_url("/agenda");
        tracing::debug!("POST {}", url);
        let body = serde_json::to_value(payload)?;
        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(map_error)?;
        Self::read_json(response)
    }

    /// Remove a record by id.
    pub fn remove(&self, id: i64) -> ClientResult<()> {
        self.get(&format!("/agenda/remove/{}", id))?;
        Ok(())
    }
}

/// Map a ureq error to a ClientError.
fn map_error(error: ureq::Error) -> ClientError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());
            let fields = serde_json::from_str::<BTreeMap<String, String>>(&message).ok();

            match (code, fields) {
                (404, _) => ClientError::NotFound,
                (409, Some(fields)) => ClientError::Conflict(fields),
                (400, Some(fields)) if !fields.contains_key("error") => {
                    ClientError::Validation(fields)
                }
                (_, Some(mut fields)) if fields.contains_key("error") => ClientError::Api {
                    status: code,
                    message: fields.remove("error").unwrap_or_default(),
                },
                _ => ClientError::Api {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => ClientError::Http(transport.to_string()),
    }
}
