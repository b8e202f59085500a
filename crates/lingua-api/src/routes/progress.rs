//! Routes for learner progress records.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lingua_progress::{ProgressRecordView, StartLesson, get_progress_by_id, handle_start_lesson};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct StartLessonRequest {
    /// The learner.
    pub user_id: Uuid,
    /// The scenario to track.
    pub lesson_id: String,
}

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The progress record affected or created.
    pub aggregate_id: Uuid,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
}

/// POST /
#[instrument(
    skip(state, request),
    fields(user_id = %request.user_id, lesson_id = %request.lesson_id)
)]
async fn start_lesson(
    State(state): State<AppState>,
    Json(request): Json<StartLessonRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    // Progress can only be tracked for lessons the catalog serves.
    state.catalog.get(&request.lesson_id)?;

    let command = StartLesson {
        correlation_id: Uuid::new_v4(),
        user_id: request.user_id,
        lesson_id: request.lesson_id,
    };

    info!(correlation_id = %command.correlation_id, "handling start_lesson command");

    let result =
        handle_start_lesson(&command, state.clock.as_ref(), &*state.event_repository).await?;

    Ok(Json(CommandResponse {
        aggregate_id: result.aggregate_id,
        event_ids: result.stored_events.iter().map(|e| e.event_id).collect(),
    }))
}

/// GET /{progress_id}
#[instrument(skip(state))]
async fn get_progress(
    State(state): State<AppState>,
    Path(progress_id): Path<Uuid>,
) -> Result<Json<ProgressRecordView>, ApiError> {
    let view = get_progress_by_id(progress_id, &*state.event_repository).await?;
    Ok(Json(view))
}

/// Returns the router for the progress context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_lesson))
        .route("/{progress_id}", get(get_progress))
}
