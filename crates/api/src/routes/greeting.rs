//! Application endpoints: the welcome payload and the greeting.

use axum::Json;
use axum::extract::Query;
use serde::Serialize;

/// Package version reported by `/`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_NAME: &str = "World";

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}

/// GET / — fixed welcome payload.
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Golden Path API",
        version: VERSION,
    })
}

/// GET /hello?name=X — greets `name`, or `World`.
///
/// Query pairs are taken as-is so repeated keys never reject the request;
/// the first `name` wins.
pub async fn hello(Query(params): Query<Vec<(String, String)>>) -> Json<GreetingResponse> {
    let name = params
        .iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.as_str());

    Json(GreetingResponse {
        message: greeting(name),
    })
}

/// Formats the greeting, substituting the default for a missing or empty name.
pub fn greeting(name: Option<&str>) -> String {
    let name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_NAME);
    format!("Hello, {name}!")
}
