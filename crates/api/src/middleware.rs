//! Request logging and metrics middleware.
//!
//! Both are applied as route layers on the application routes only, so probe
//! and scrape traffic never reaches them.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, MatchedPath, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// One completed request, as logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: String,
    pub path: String,
    pub status: u16,
    pub latency: Duration,
    pub remote_addr: String,
    pub user_agent: String,
}

impl RequestRecord {
    /// Captures the request side; status and latency are filled by [`finish`](Self::finish).
    pub fn start(req: &Request) -> Self {
        let remote_addr = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.to_string())
            .unwrap_or_default();
        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        Self {
            method: req.method().to_string(),
            path: req.uri().path().to_owned(),
            status: 0,
            latency: Duration::ZERO,
            remote_addr,
            user_agent,
        }
    }

    /// Records the status of the response written downstream.
    pub fn finish(mut self, response: &Response, started: Instant) -> Self {
        self.status = response.status().as_u16();
        self.latency = started.elapsed();
        self
    }

    /// Logs the record as one INFO `request` event.
    pub fn emit(&self) {
        tracing::info!(
            method = %self.method,
            path = %self.path,
            status = self.status,
            latency_ms = u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX),
            remote_addr = %self.remote_addr,
            user_agent = %self.user_agent,
            "request"
        );
    }
}

/// Emits one structured log event per request.
pub async fn log_request(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let record = RequestRecord::start(&req);

    let response = next.run(req).await;

    record.finish(&response, started).emit();
    response
}

/// Records `http_requests_total` and `http_request_duration_seconds`,
/// labelled by the matched route template.
pub async fn track_metrics(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;

    state.record_request(&method, &path, response.status().as_u16(), started.elapsed());
    response
}
