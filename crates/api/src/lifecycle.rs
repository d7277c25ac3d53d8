//! Startup readiness delay, signal handling and bounded graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;

use crate::state::AppState;

/// Flips the readiness flag after `delay`, simulating startup work.
pub async fn mark_ready_after(state: Arc<AppState>, delay: Duration) {
    tokio::time::sleep(delay).await;
    state.set_ready(true);
    tracing::info!("application is ready");
}

/// Waits for a shutdown signal (SIGINT or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Serves `app` until `shutdown` resolves, then drains in-flight requests for
/// at most `grace`.
///
/// Drain failures and an elapsed grace period are logged, not returned.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F, grace: Duration)
where
    F: Future<Output = ()> + Send + 'static,
{
    let (drain_tx, drain_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = drain_rx.await;
        })
        .await
    });

    shutdown.await;
    tracing::info!(grace_secs = grace.as_secs(), "shutting down server");
    let _ = drain_tx.send(());

    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => tracing::info!("server stopped"),
        Ok(Ok(Err(err))) => tracing::error!(error = %err, "server shutdown error"),
        Ok(Err(err)) => tracing::error!(error = %err, "server task failed"),
        Err(_) => tracing::warn!("grace period elapsed with requests still in flight"),
    }
}
