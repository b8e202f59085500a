//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lingua_content::{ScenarioCatalog, ValidationOptions};
use lingua_core::clock::Clock;
use lingua_core::repository::EventRepository;
use lingua_dialogue::FlatXp;
use lingua_event_store::InMemoryEventRepository;
use lingua_test_support::{FixedClock, fixed_now};
use tower::ServiceExt;

use lingua_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixed_now()))
}

/// A repository shared between the apps built for one test, so state
/// written by one request is visible to the next.
pub fn shared_repository() -> Arc<dyn EventRepository> {
    Arc::new(InMemoryEventRepository::new())
}

/// Build the full app router over the bundled catalog with a deterministic
/// clock. Uses the same route structure as `main.rs`.
pub fn build_test_app(event_repository: Arc<dyn EventRepository>) -> Router {
    let (catalog, report) = ScenarioCatalog::bundled(&ValidationOptions::default());
    assert!(report.rejected.is_empty(), "bundled content must validate");

    let app_state = AppState::new(
        fixed_clock(),
        event_repository,
        Arc::new(catalog),
        Arc::new(FlatXp::default()),
    );
    lingua_api::build_router(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
