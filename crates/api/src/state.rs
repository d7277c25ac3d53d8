//! Shared handler state: the readiness flag and request metrics.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::telemetry::{REQUEST_DURATION_SECONDS, REQUESTS_TOTAL};

/// State shared by all handlers.
///
/// Owns the readiness flag so tests can build independent instances. Metric
/// samples go to the process-wide `metrics` recorder.
#[derive(Debug, Default)]
pub struct AppState {
    ready: AtomicBool,
}

impl AppState {
    /// Creates a state that is not ready yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the readiness flag.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }

    /// Returns whether the service accepts traffic.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Counts one request and observes its duration.
    pub fn record_request(&self, method: &str, path: &str, status: u16, duration: Duration) {
        metrics::counter!(
            REQUESTS_TOTAL,
            "method" => method.to_owned(),
            "path" => path.to_owned(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!(
            REQUEST_DURATION_SECONDS,
            "method" => method.to_owned(),
            "path" => path.to_owned()
        )
        .record(duration.as_secs_f64());
    }
}
