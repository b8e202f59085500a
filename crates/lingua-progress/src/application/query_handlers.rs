//! Query handlers for the progress context.
//!
//! This module contains query handlers that reconstitute aggregates
//! from stored events and return read-only view DTOs.

use chrono::{DateTime, Utc};
use lingua_core::error::DomainError;
use lingua_core::repository::EventRepository;
use lingua_core::vocabulary::VocabularyWord;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::LessonStatus;

/// Read-only view of a progress record.
#[derive(Debug, Serialize)]
pub struct ProgressRecordView {
    /// The progress record identifier.
    pub id: Uuid,
    /// The learner.
    pub user_id: Option<Uuid>,
    /// The tracked lesson (scenario) identifier.
    pub lesson_id: Option<String>,
    /// Where the learner stands in the lesson.
    pub status: LessonStatus,
    /// Best score over all completions.
    pub score: u32,
    /// Latest completion time.
    pub completion_date: Option<DateTime<Utc>>,
    /// XP accumulated over all completions.
    pub xp_earned: u32,
    /// Whether the latest completion kept the daily streak.
    pub streak_maintained: bool,
    /// Number of completions recorded.
    pub completion_count: u32,
    /// Every word met on any completed run, first encounter order.
    pub vocabulary_learned: Vec<VocabularyWord>,
    /// When the record was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the last event was recorded.
    pub updated_at: Option<DateTime<Utc>>,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves a progress record by its aggregate ID.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no events exist for the ID.
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub async fn get_progress_by_id(
    progress_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<ProgressRecordView, DomainError> {
    let stored_events = repo.load_events(progress_id).await?;
    if stored_events.is_empty() {
        return Err(DomainError::AggregateNotFound(progress_id));
    }
    let progress = command_handlers::reconstitute(progress_id, &stored_events)?;
    Ok(ProgressRecordView {
        id: progress_id,
        user_id: progress.user_id,
        lesson_id: progress.lesson_id,
        status: progress.status,
        score: progress.score,
        completion_date: progress.completion_date,
        xp_earned: progress.xp_earned,
        streak_maintained: progress.streak_maintained,
        completion_count: progress.completion_count,
        vocabulary_learned: progress.vocabulary,
        created_at: progress.created_at,
        updated_at: progress.updated_at,
        version: progress.version,
    })
}

#[cfg(test)]
mod tests {
    use lingua_core::error::DomainError;
    use lingua_core::repository::StoredEvent;
    use lingua_test_support::{EmptyEventRepository, RecordingEventRepository, fixed_now};
    use uuid::Uuid;

    use crate::application::query_handlers::get_progress_by_id;
    use crate::domain::aggregates::LessonStatus;
    use crate::domain::events::{LessonStarted, ProgressEventKind};

    #[tokio::test]
    async fn test_get_progress_by_id_returns_view_with_state() {
        // Arrange
        let progress_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let events = vec![StoredEvent {
            event_id: Uuid::new_v4(),
            aggregate_id: progress_id,
            event_type: "progress.lesson_started".to_owned(),
            payload: serde_json::to_value(ProgressEventKind::LessonStarted(LessonStarted {
                progress_id,
                user_id,
                lesson_id: "market-basics-001".to_owned(),
            }))
            .unwrap(),
            sequence_number: 1,
            correlation_id: Uuid::new_v4(),
            causation_id: Uuid::new_v4(),
            occurred_at: fixed_now(),
        }];
        let repo = RecordingEventRepository::new(events);

        // Act
        let view = get_progress_by_id(progress_id, &repo).await.unwrap();

        // Assert
        assert_eq!(view.id, progress_id);
        assert_eq!(view.user_id, Some(user_id));
        assert_eq!(view.lesson_id.as_deref(), Some("market-basics-001"));
        assert_eq!(view.status, LessonStatus::NotStarted);
        assert_eq!(view.score, 0);
        assert!(view.completion_date.is_none());
        assert_eq!(view.created_at, Some(fixed_now()));
        assert_eq!(view.updated_at, Some(fixed_now()));
        assert_eq!(view.version, 1);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "not_started");
    }

    #[tokio::test]
    async fn test_get_progress_by_id_returns_not_found_when_no_events() {
        // Arrange
        let progress_id = Uuid::new_v4();
        let repo = EmptyEventRepository;

        // Act
        let result = get_progress_by_id(progress_id, &repo).await;

        // Assert
        assert!(result.is_err());
        match result.unwrap_err() {
            DomainError::AggregateNotFound(id) => assert_eq!(id, progress_id),
            other => panic!("expected AggregateNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_progress_by_id_reports_corrupt_payload() {
        let progress_id = Uuid::new_v4();
        let events = vec![StoredEvent {
            event_id: Uuid::new_v4(),
            aggregate_id: progress_id,
            event_type: "progress.lesson_started".to_owned(),
            payload: serde_json::json!({ "Unknown": {} }),
            sequence_number: 1,
            correlation_id: Uuid::new_v4(),
            causation_id: Uuid::new_v4(),
            occurred_at: fixed_now(),
        }];
        let repo = RecordingEventRepository::new(events);

        let result = get_progress_by_id(progress_id, &repo).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
