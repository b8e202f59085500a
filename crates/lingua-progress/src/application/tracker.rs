//! Adapter from the dialogue engine's completion port to the progress record.

use async_trait::async_trait;
use lingua_core::clock::Clock;
use lingua_core::completion::{CompletionSummary, ProgressSink};
use lingua_core::error::DomainError;
use lingua_core::repository::EventRepository;
use uuid::Uuid;

use super::command_handlers::handle_complete_lesson;
use crate::domain::commands::CompleteLesson;

/// Writes completion summaries into one progress record.
pub struct ProgressTracker<'a> {
    progress_id: Uuid,
    correlation_id: Uuid,
    clock: &'a dyn Clock,
    repo: &'a dyn EventRepository,
}

impl<'a> ProgressTracker<'a> {
    /// Creates a tracker for `progress_id`.
    #[must_use]
    pub fn new(
        progress_id: Uuid,
        correlation_id: Uuid,
        clock: &'a dyn Clock,
        repo: &'a dyn EventRepository,
    ) -> Self {
        Self {
            progress_id,
            correlation_id,
            clock,
            repo,
        }
    }
}

#[async_trait]
impl ProgressSink for ProgressTracker<'_> {
    async fn record_completion(&self, summary: &CompletionSummary) -> Result<(), DomainError> {
        let command = CompleteLesson {
            correlation_id: self.correlation_id,
            progress_id: self.progress_id,
            summary: summary.clone(),
        };
        handle_complete_lesson(&command, self.clock, self.repo).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lingua_core::repository::StoredEvent;
    use lingua_core::vocabulary::VocabularyWord;
    use lingua_test_support::{FixedClock, RecordingEventRepository, fixed_now};

    use super::*;
    use crate::domain::events::{LessonStarted, ProgressEventKind};

    fn started(progress_id: Uuid) -> StoredEvent {
        StoredEvent {
            event_id: Uuid::new_v4(),
            aggregate_id: progress_id,
            event_type: "progress.lesson_started".to_owned(),
            payload: serde_json::to_value(ProgressEventKind::LessonStarted(LessonStarted {
                progress_id,
                user_id: Uuid::new_v4(),
                lesson_id: "greetings-001".to_owned(),
            }))
            .unwrap(),
            sequence_number: 1,
            correlation_id: Uuid::new_v4(),
            causation_id: Uuid::new_v4(),
            occurred_at: fixed_now(),
        }
    }

    fn summary(scenario_id: &str) -> CompletionSummary {
        CompletionSummary {
            scenario_id: scenario_id.to_owned(),
            language_code: "sw".to_owned(),
            segments_visited: 3,
            vocabulary_encountered: vec![VocabularyWord::new("jirani", "neighbour")],
            score: 3,
            xp_earned: 10,
            invalid_attempts: 0,
        }
    }

    #[tokio::test]
    async fn test_tracker_completes_its_record() {
        // Arrange
        let progress_id = Uuid::new_v4();
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock(fixed_now());
        let repo = RecordingEventRepository::new(vec![started(progress_id)]);
        let tracker = ProgressTracker::new(progress_id, correlation_id, &clock, &repo);

        // Act
        tracker
            .record_completion(&summary("greetings-001"))
            .await
            .unwrap();

        // Assert
        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);
        let (agg_id, _, events) = &appended[0];
        assert_eq!(*agg_id, progress_id);
        assert_eq!(events[0].event_type, "progress.lesson_completed");
        assert_eq!(events[0].correlation_id, correlation_id);
    }

    #[tokio::test]
    async fn test_tracker_rejects_summary_for_another_lesson() {
        let progress_id = Uuid::new_v4();
        let clock = FixedClock(fixed_now());
        let repo = RecordingEventRepository::new(vec![started(progress_id)]);
        let tracker = ProgressTracker::new(progress_id, Uuid::new_v4(), &clock, &repo);

        let result = tracker.record_completion(&summary("market-basics-001")).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.appended_events().is_empty());
    }
}
