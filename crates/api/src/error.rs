//! Startup error types.
//!
//! Request handlers are total and never surface errors; everything here is
//! fatal and maps to a non-zero exit code in `main`.

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors that abort server startup.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install Prometheus recorder: {0}")]
    Metrics(#[from] BuildError),
}
