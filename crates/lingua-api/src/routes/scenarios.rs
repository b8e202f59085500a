//! Routes for browsing scenarios and walking through them.
//!
//! The server keeps no traversal state. Clients send their choice history
//! with each request and the traversal is replayed against the catalog.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lingua_content::ValidatedScenario;
use lingua_core::completion::CompletionSummary;
use lingua_dialogue::{DialogueError, Traversal, TraversalView, report_completion};
use lingua_progress::{MarkLessonInProgress, ProgressTracker, handle_mark_lesson_in_progress};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// One language variant of a scenario.
#[derive(Debug, Serialize)]
pub struct LanguageSummary {
    /// Language code, e.g. `sw`.
    pub code: String,
    /// Display name of the language.
    pub name: String,
    /// Number of segments in the variant.
    pub segment_count: usize,
}

/// Catalog entry for a scenario.
#[derive(Debug, Serialize)]
pub struct ScenarioSummary {
    /// Scenario identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description of the situation.
    pub description: String,
    /// Cover image URL.
    pub image_url: String,
    /// SHA-256 of the authored content.
    pub version_hash: String,
    /// Available language variants.
    pub languages: Vec<LanguageSummary>,
}

impl From<&ValidatedScenario> for ScenarioSummary {
    fn from(scenario: &ValidatedScenario) -> Self {
        Self {
            id: scenario.id().to_owned(),
            title: scenario.title().to_owned(),
            description: scenario.description().to_owned(),
            image_url: scenario.image_url().to_owned(),
            version_hash: scenario.version_hash().to_owned(),
            languages: scenario
                .languages()
                .map(|graph| LanguageSummary {
                    code: graph.code().to_owned(),
                    name: graph.name().to_owned(),
                    segment_count: graph.len(),
                })
                .collect(),
        }
    }
}

/// Request body for POST /{scenario_id}/traversals.
#[derive(Debug, Deserialize)]
pub struct TraversalRequest {
    /// Language variant to traverse.
    pub language: String,
    /// Option ids chosen so far, oldest first.
    #[serde(default)]
    pub choices: Vec<String>,
    /// Rejected attempts the client counted.
    #[serde(default)]
    pub invalid_attempts: u32,
    /// Progress record to mark `in_progress` once a choice was made.
    #[serde(default)]
    pub progress_id: Option<Uuid>,
}

/// Response body for POST /{scenario_id}/traversals.
#[derive(Debug, Serialize)]
pub struct TraversalResponse {
    /// Current traversal state.
    #[serde(flatten)]
    pub traversal: TraversalView,
    /// The reply to the most recent choice, if any.
    pub last_response: Option<String>,
}

/// Request body for POST /{scenario_id}/completions.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    /// Language variant that was traversed.
    pub language: String,
    /// Every option id chosen, oldest first.
    pub choices: Vec<String>,
    /// Rejected attempts the client counted.
    #[serde(default)]
    pub invalid_attempts: u32,
    /// Progress record receiving the completion.
    pub progress_id: Uuid,
}

fn replay(
    scenario: &ValidatedScenario,
    language: &str,
    choices: &[String],
    invalid_attempts: u32,
) -> Result<(Traversal, Option<String>), DialogueError> {
    let mut traversal = Traversal::start(scenario, language)?;
    let mut last_response = None;
    for choice in choices {
        let step = traversal.advance(scenario, choice)?;
        traversal = step.traversal;
        last_response = Some(step.response);
    }
    Ok((traversal.with_invalid_attempts(invalid_attempts), last_response))
}

/// GET /
#[instrument(skip(state))]
async fn list_scenarios(State(state): State<AppState>) -> Json<Vec<ScenarioSummary>> {
    Json(
        state
            .catalog
            .iter()
            .map(|scenario| ScenarioSummary::from(scenario.as_ref()))
            .collect(),
    )
}

/// GET /{scenario_id}
#[instrument(skip(state))]
async fn get_scenario(
    State(state): State<AppState>,
    Path(scenario_id): Path<String>,
) -> Result<Json<ScenarioSummary>, ApiError> {
    let scenario = state.catalog.get(&scenario_id)?;
    Ok(Json(ScenarioSummary::from(scenario.as_ref())))
}

/// POST /{scenario_id}/traversals
#[instrument(
    skip(state, request),
    fields(language = %request.language, choices = request.choices.len())
)]
async fn traverse(
    State(state): State<AppState>,
    Path(scenario_id): Path<String>,
    Json(request): Json<TraversalRequest>,
) -> Result<Json<TraversalResponse>, ApiError> {
    let scenario = state.catalog.get(&scenario_id)?;
    let (traversal, last_response) = replay(
        &scenario,
        &request.language,
        &request.choices,
        request.invalid_attempts,
    )?;

    if let Some(progress_id) = request.progress_id.filter(|_| !request.choices.is_empty()) {
        let command = MarkLessonInProgress {
            correlation_id: Uuid::new_v4(),
            progress_id,
            lesson_id: scenario_id,
        };
        info!(
            correlation_id = %command.correlation_id,
            %progress_id,
            "handling mark_lesson_in_progress command"
        );
        handle_mark_lesson_in_progress(
            &command,
            state.clock.as_ref(),
            &*state.event_repository,
        )
        .await?;
    }

    Ok(Json(TraversalResponse {
        traversal: traversal.view(&scenario),
        last_response,
    }))
}

/// POST /{scenario_id}/completions
#[instrument(
    skip(state, request),
    fields(language = %request.language, progress_id = %request.progress_id)
)]
async fn complete(
    State(state): State<AppState>,
    Path(scenario_id): Path<String>,
    Json(request): Json<CompletionRequest>,
) -> Result<Json<CompletionSummary>, ApiError> {
    let scenario = state.catalog.get(&scenario_id)?;
    let (traversal, _) = replay(
        &scenario,
        &request.language,
        &request.choices,
        request.invalid_attempts,
    )?;

    let correlation_id = Uuid::new_v4();
    info!(%correlation_id, "handling complete_lesson command");
    let tracker = ProgressTracker::new(
        request.progress_id,
        correlation_id,
        state.clock.as_ref(),
        &*state.event_repository,
    );
    let summary = report_completion(&traversal, state.xp_policy.as_ref(), &tracker).await?;

    Ok(Json(summary))
}

/// Returns the router for the scenario context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_scenarios))
        .route("/{scenario_id}", get(get_scenario))
        .route("/{scenario_id}/traversals", post(traverse))
        .route("/{scenario_id}/completions", post(complete))
}
