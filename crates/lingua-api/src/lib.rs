//! Lingua — HTTP API.
//!
//! Serves the scenario catalog, stateless traversals that replay a client's
//! choice history, completion reporting and learner progress records.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router without middleware layers.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/scenarios", routes::scenarios::router())
        .nest("/api/v1/progress", routes::progress::router())
        .with_state(app_state)
}
