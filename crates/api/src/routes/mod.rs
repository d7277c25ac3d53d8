//! HTTP route handlers.

pub mod greeting;
pub mod health;
pub mod metrics;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Fallback for unknown paths.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
