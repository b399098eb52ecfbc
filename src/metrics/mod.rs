//! Request and outcome counters for the Agenda server.
//!
//! `/metrics` serves a [`MetricsSummary`] snapshot as JSON.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    /// Responses with a 4xx/5xx status
    failed_requests: AtomicU64,
    request_millis: AtomicU64,
    created: AtomicU64,
    removed: AtomicU64,
    /// Registrations or removals rejected with 409
    conflicts: AtomicU64,
}

/// Shared handle to the server's counters. Clones count into the same set.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing one HTTP request.
    pub fn start_request(&self) -> RequestTimer {
        RequestTimer {
            started_at: Instant::now(),
            metrics: self.clone(),
        }
    }

    pub fn record_agenda_created(&self) {
        self.counters.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_agenda_removed(&self) {
        self.counters.removed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_conflict(&self) {
        self.counters.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    fn record_request(&self, elapsed: Duration, failed: bool) {
        let c = &self.counters;
        c.requests.fetch_add(1, Ordering::Relaxed);
        c.request_millis
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
        if failed {
            c.failed_requests.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Point-in-time copy of every counter.
    pub fn summary(&self) -> MetricsSummary {
        let c = &self.counters;
        let requests = c.requests.load(Ordering::Relaxed);
        let millis = c.request_millis.load(Ordering::Relaxed);

        MetricsSummary {
            http_requests_total: requests,
            http_errors_total: c.failed_requests.load(Ordering::Relaxed),
            http_duration_avg_ms: if requests == 0 {
                0.0
            } else {
                millis as f64 / requests as f64
            },
            agendas_created_total: c.created.load(Ordering::Relaxed),
            agendas_removed_total: c.removed.load(Ordering::Relaxed),
            conflicts_total: c.conflicts.load(Ordering::Relaxed),
        }
    }
}

/// The JSON body of `/metrics`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub agendas_created_total: u64,
    pub agendas_removed_total: u64,
    pub conflicts_total: u64,
}

/// Measures one request; see [`Metrics::start_request`].
pub struct RequestTimer {
    started_at: Instant,
    metrics: Metrics,
}

impl RequestTimer {
    /// Record the request, counting it as failed if `failed`, and return
    /// how long it took.
    pub fn finish(self, failed: bool) -> Duration {
        let elapsed = self.started_at.elapsed();
        self.metrics.record_request(elapsed, failed);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_starts_at_zero() {
        let summary = Metrics::new().summary();
        assert_eq!(summary.http_requests_total, 0);
        assert_eq!(summary.http_duration_avg_ms, 0.0);
        assert_eq!(summary.agendas_created_total, 0);
    }

    #[test]
    fn test_average_duration() {
        let metrics = Metrics::new();
        metrics.record_request(Duration::from_millis(100), false);
        metrics.record_request(Duration::from_millis(200), true);

        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 2);
        assert_eq!(summary.http_errors_total, 1);
        assert_eq!(summary.http_duration_avg_ms, 150.0);
    }

    #[test]
    fn test_outcome_counters_serialize() {
        let metrics = Metrics::new();
        metrics.record_agenda_created();
        metrics.record_agenda_created();
        metrics.record_agenda_removed();
        metrics.record_conflict();

        let json = serde_json::to_value(metrics.summary()).unwrap();
        assert_eq!(json["agendas_created_total"], 2);
        assert_eq!(json["agendas_removed_total"], 1);
        assert_eq!(json["conflicts_total"], 1);
    }

    #[test]
    fn test_request_timer() {
        let metrics = Metrics::new();
        let timer = metrics.start_request();
        thread::sleep(Duration::from_millis(10));
        let elapsed = timer.finish(false);

        assert!(elapsed >= Duration::from_millis(10));
        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 1);
        assert_eq!(summary.http_errors_total, 0);
        assert!(summary.http_duration_avg_ms >= 10.0);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let metrics = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_agenda_created();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.summary().agendas_created_total, 200);
    }
}
