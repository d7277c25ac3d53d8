//! Integration tests for the HTTP surface.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use golden_path_api::state::AppState;
use tower::ServiceExt;

fn setup() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new());
    // Not installed globally: these tests do not read metric values.
    let metrics_handle = golden_path_api::telemetry::prometheus_builder()
        .unwrap()
        .build_recorder()
        .handle();
    let app = golden_path_api::create_app(state.clone(), metrics_handle, Duration::from_secs(10));
    (app, state)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, content_type, json)
}

#[tokio::test]
async fn test_healthz_ok_before_ready() {
    let (app, _) = setup();

    let (status, content_type, json) = get(app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(json, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_healthz_ok_after_ready() {
    let (app, state) = setup();
    state.set_ready(true);

    let (status, _, json) = get(app, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_readyz_not_ready() {
    let (app, _) = setup();

    let (status, _, json) = get(app, "/readyz").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json,
        serde_json::json!({ "status": "not ready", "reason": "initialization in progress" })
    );
}

#[tokio::test]
async fn test_readyz_transitions_to_ready() {
    let (app, state) = setup();

    let (before, _, _) = get(app.clone(), "/readyz").await;
    assert_eq!(before, StatusCode::SERVICE_UNAVAILABLE);

    state.set_ready(true);

    let (after, _, json) = get(app, "/readyz").await;
    assert_eq!(after, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "status": "ready" }));
}

#[tokio::test]
async fn test_root() {
    let (app, _) = setup();

    let (status, content_type, json) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(json["message"], "Welcome to Golden Path API");
    assert_eq!(json["version"], "1.0.0");
}

#[tokio::test]
async fn test_hello_default() {
    let (app, _) = setup();

    let (status, _, json) = get(app, "/hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Hello, World!");
}

#[tokio::test]
async fn test_hello_with_name() {
    let (app, _) = setup();

    let (status, _, json) = get(app, "/hello?name=Gopher").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Hello, Gopher!");
}

#[tokio::test]
async fn test_hello_empty_name() {
    let (app, _) = setup();

    let (_, _, json) = get(app, "/hello?name=").await;

    assert_eq!(json["message"], "Hello, World!");
}

#[tokio::test]
async fn test_hello_decodes_name() {
    let (app, _) = setup();

    let (_, _, json) = get(app, "/hello?name=Jane%20Doe").await;

    assert_eq!(json["message"], "Hello, Jane Doe!");
}

#[tokio::test]
async fn test_hello_repeated_name_uses_first() {
    let (app, _) = setup();

    let (status, _, json) = get(app, "/hello?name=Ferris&name=Gopher").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Hello, Ferris!");
}

#[tokio::test]
async fn test_hello_ignores_other_params() {
    let (app, _) = setup();

    let (status, _, json) = get(app, "/hello?lang=en&flag").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Hello, World!");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (app, _) = setup();

    let (status, _, json) = get(app, "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not found");
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/hello")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_metrics_endpoint_content_type() {
    let (app, _) = setup();

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        golden_path_api::routes::metrics::CONTENT_TYPE
    );
}
