//! Lingua — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lingua_content::ContentError;
use lingua_core::error::DomainError;
use lingua_dialogue::{DialogueError, ReportError};
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid or scenario content is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around the library errors that implements
/// `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Dialogue(#[from] DialogueError),
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Dialogue(e) => Self::Dialogue(e),
            ReportError::Sink(e) => Self::Domain(e),
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Domain(e) => match e {
                DomainError::AggregateNotFound(_) => {
                    (StatusCode::NOT_FOUND, "aggregate_not_found")
                }
                DomainError::ConcurrencyConflict { .. } => {
                    (StatusCode::CONFLICT, "concurrency_conflict")
                }
                DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                DomainError::Infrastructure(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
                }
            },
            Self::Content(e) => match e {
                ContentError::ScenarioNotFound(_) => (StatusCode::NOT_FOUND, "scenario_not_found"),
                ContentError::Parse { .. } | ContentError::Invalid(_) => {
                    (StatusCode::BAD_REQUEST, "invalid_scenario")
                }
                ContentError::DuplicateScenario { .. } => {
                    (StatusCode::CONFLICT, "duplicate_scenario")
                }
                ContentError::Io { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
                }
            },
            Self::Dialogue(e) => match e {
                DialogueError::InvalidChoice { .. } => (StatusCode::BAD_REQUEST, "invalid_choice"),
                DialogueError::ScenarioMismatch { .. } => {
                    (StatusCode::BAD_REQUEST, "scenario_mismatch")
                }
                DialogueError::UnknownLanguageVariant { .. } => {
                    (StatusCode::NOT_FOUND, "unknown_language")
                }
                DialogueError::AlreadyComplete { .. } => (StatusCode::CONFLICT, "already_complete"),
                DialogueError::NotComplete { .. } => (StatusCode::CONFLICT, "not_complete"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_not_found_errors_map_to_404() {
        assert_eq!(
            status_of(DomainError::AggregateNotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ContentError::ScenarioNotFound("nope".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DialogueError::UnknownLanguageVariant {
                scenario_id: "market-basics-001".into(),
                language_code: "de".into(),
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_rejected_input_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DialogueError::InvalidChoice {
                segment_id: "sw-1".into(),
                option_id: "sw-9".into(),
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_state_conflicts_map_to_409() {
        assert_eq!(
            status_of(DomainError::ConcurrencyConflict {
                aggregate_id: Uuid::new_v4(),
                expected: 1,
                actual: 2,
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DialogueError::AlreadyComplete {
                scenario_id: "market-basics-001".into(),
                language_code: "sw".into(),
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ReportError::Dialogue(DialogueError::NotComplete {
                scenario_id: "market-basics-001".into(),
                language_code: "sw".into(),
            })),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(ReportError::Sink(DomainError::Infrastructure("db down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
