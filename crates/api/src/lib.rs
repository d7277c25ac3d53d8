//! Golden path demo HTTP service.
//!
//! Exposes liveness and readiness probes, a Prometheus scrape endpoint and two
//! trivial application endpoints, with structured request logging (tracing)
//! on the application routes.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use config::Config;
use error::ServerError;
use state::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// `/` and `/hello` are logged and instrumented; the probes and `/metrics`
/// are not.
pub fn create_app(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    request_timeout: Duration,
) -> Router {
    let app_routes = Router::new()
        .route("/", get(routes::greeting::root))
        .route("/hello", get(routes::greeting::hello));

    let probe_routes = Router::new()
        .route("/healthz", get(routes::health::healthz))
        .route("/readyz", get(routes::health::readyz))
        .with_state(state.clone())
        .layer(timeout_layer(request_timeout));

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle)
        .layer(timeout_layer(request_timeout));

    instrument(app_routes, state, request_timeout)
        .merge(probe_routes)
        .merge(metrics_router)
        .fallback(routes::not_found)
}

/// Wraps application routes in the request timeout, metrics and logging
/// route layers, innermost first.
///
/// The timeout sits inside both middlewares so a timed-out request is still
/// logged and counted with its 408.
pub fn instrument(routes: Router, state: Arc<AppState>, request_timeout: Duration) -> Router {
    routes
        .route_layer(timeout_layer(request_timeout))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::track_metrics,
        ))
        .route_layer(axum::middleware::from_fn(middleware::log_request))
}

fn timeout_layer(request_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout)
}

/// Runs the service until a termination signal arrives.
///
/// Returns an error only when startup fails.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let metrics_handle = telemetry::install_metrics_recorder()?;
    let state = Arc::new(AppState::new());
    let app = create_app(
        state.clone(),
        metrics_handle.clone(),
        config.request_timeout,
    );

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(%addr, "starting server");

    tokio::spawn(telemetry::run_upkeep(
        metrics_handle,
        telemetry::UPKEEP_INTERVAL,
    ));
    tokio::spawn(lifecycle::mark_ready_after(state, config.ready_delay));

    lifecycle::serve(
        listener,
        app,
        lifecycle::shutdown_signal(),
        config.shutdown_grace,
    )
    .await;

    Ok(())
}
