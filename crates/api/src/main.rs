//! API server entry point.

use std::process::ExitCode;

use golden_path_api::config::Config;
use golden_path_api::error::ServerError;
use golden_path_api::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Load configuration; tracing falls back to defaults so the error is still logged
    let config = Config::from_env();
    let defaults = Config::default();
    let logging = config.as_ref().unwrap_or(&defaults);

    // 2. Initialize tracing
    telemetry::init_tracing(&logging.log_level, logging.log_format);

    // 3. Serve until SIGINT/SIGTERM
    let outcome = match config {
        Ok(config) => golden_path_api::run(config).await,
        Err(err) => Err(ServerError::from(err)),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "server failed to start");
            ExitCode::FAILURE
        }
    }
}
