//! Aggregate roots for the progress context.

use chrono::{DateTime, NaiveDate, Utc};
use lingua_core::aggregate::AggregateRoot;
use lingua_core::clock::Clock;
use lingua_core::completion::CompletionSummary;
use lingua_core::error::DomainError;
use lingua_core::event::EventMetadata;
use lingua_core::vocabulary::{VocabularyWord, dedup_in_encounter_order};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::events::{
    LESSON_COMPLETED_EVENT_TYPE, LESSON_IN_PROGRESS_EVENT_TYPE, LESSON_STARTED_EVENT_TYPE,
    LessonCompleted, LessonMarkedInProgress, LessonStarted, ProgressEvent, ProgressEventKind,
};

/// Where a learner stands in a lesson.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    /// Record created, no choice made yet.
    #[default]
    NotStarted,
    /// At least one choice made.
    InProgress,
    /// Completed at least once.
    Completed,
}

/// The aggregate root for one learner's progress through one lesson.
#[derive(Debug)]
pub struct LessonProgress {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// The learner.
    pub(crate) user_id: Option<Uuid>,
    /// The lesson (scenario) identifier.
    pub(crate) lesson_id: Option<String>,
    pub(crate) status: LessonStatus,
    /// Best score over all completions.
    pub(crate) score: u32,
    /// XP accumulated over all completions.
    pub(crate) xp_earned: u32,
    pub(crate) streak_maintained: bool,
    pub(crate) completion_date: Option<DateTime<Utc>>,
    pub(crate) completion_count: u32,
    /// Every word met on any completed run, first encounter order.
    pub(crate) vocabulary: Vec<VocabularyWord>,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
    /// Latest start or completion. Marking in progress does not count.
    pub(crate) last_activity_at: Option<DateTime<Utc>>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<ProgressEvent>,
}

impl LessonProgress {
    /// Creates an empty progress record.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            user_id: None,
            lesson_id: None,
            status: LessonStatus::NotStarted,
            score: 0,
            xp_earned: 0,
            streak_maintained: false,
            completion_date: None,
            completion_count: 0,
            vocabulary: Vec::new(),
            created_at: None,
            updated_at: None,
            last_activity_at: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn metadata(&self, event_type: &str, correlation_id: Uuid, clock: &dyn Clock) -> EventMetadata {
        EventMetadata {
            event_id: Uuid::new_v4(),
            event_type: event_type.to_owned(),
            aggregate_id: self.id,
            sequence_number: self.next_sequence_number(),
            correlation_id,
            causation_id: correlation_id,
            occurred_at: clock.now(),
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> LessonStatus {
        self.status
    }

    /// The tracked lesson, once started.
    #[must_use]
    pub fn lesson_id(&self) -> Option<&str> {
        self.lesson_id.as_deref()
    }

    /// Starts tracking a lesson, producing a `LessonStarted` event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the record was already started or
    /// the lesson id is blank.
    pub fn start_lesson(
        &mut self,
        user_id: Uuid,
        lesson_id: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.version > 0 || !self.uncommitted_events.is_empty() {
            return Err(DomainError::Validation(format!(
                "progress record {} already started",
                self.id
            )));
        }
        if lesson_id.trim().is_empty() {
            return Err(DomainError::Validation("lesson id must not be empty".into()));
        }

        let event = ProgressEvent {
            metadata: self.metadata(LESSON_STARTED_EVENT_TYPE, correlation_id, clock),
            kind: ProgressEventKind::LessonStarted(LessonStarted {
                progress_id: self.id,
                user_id,
                lesson_id: lesson_id.to_owned(),
            }),
        };
        self.uncommitted_events.push(event);
        Ok(())
    }

    /// Moves a `not_started` record to `in_progress`, producing a
    /// `LessonMarkedInProgress` event. Any later status is left alone and no
    /// event is produced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the record tracks another lesson.
    pub fn mark_in_progress(
        &mut self,
        lesson_id: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_lesson(lesson_id)?;
        if self.status != LessonStatus::NotStarted {
            return Ok(());
        }
        let event = ProgressEvent {
            metadata: self.metadata(LESSON_IN_PROGRESS_EVENT_TYPE, correlation_id, clock),
            kind: ProgressEventKind::LessonMarkedInProgress(LessonMarkedInProgress {
                progress_id: self.id,
            }),
        };
        self.uncommitted_events.push(event);
        Ok(())
    }

    /// Records a completed traversal, producing a `LessonCompleted` event.
    ///
    /// The streak is maintained when the completion falls on the UTC day of
    /// the record's last start or completion, or on the day after it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the summary is for another lesson.
    pub fn complete_lesson(
        &mut self,
        summary: &CompletionSummary,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.ensure_lesson(&summary.scenario_id)?;

        let metadata = self.metadata(LESSON_COMPLETED_EVENT_TYPE, correlation_id, clock);
        let completed_at = metadata.occurred_at;
        let event = ProgressEvent {
            metadata,
            kind: ProgressEventKind::LessonCompleted(LessonCompleted {
                progress_id: self.id,
                language_code: summary.language_code.clone(),
                score: summary.score,
                xp_earned: summary.xp_earned,
                vocabulary: summary.vocabulary_encountered.clone(),
                streak_maintained: self.keeps_streak(completed_at.date_naive()),
                completed_at,
            }),
        };
        self.uncommitted_events.push(event);
        Ok(())
    }

    fn ensure_lesson(&self, lesson_id: &str) -> Result<(), DomainError> {
        if self.lesson_id.as_deref() == Some(lesson_id) {
            return Ok(());
        }
        Err(DomainError::Validation(format!(
            "scenario {lesson_id} does not match lesson {} of progress record {}",
            self.lesson_id.as_deref().unwrap_or("<none>"),
            self.id
        )))
    }

    fn keeps_streak(&self, day: NaiveDate) -> bool {
        self.last_activity_at.is_some_and(|at| {
            let last = at.date_naive();
            last == day || last.succ_opt() == Some(day)
        })
    }
}

impl AggregateRoot for LessonProgress {
    type Event = ProgressEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        let occurred_at = event.metadata.occurred_at;
        match &event.kind {
            ProgressEventKind::LessonStarted(payload) => {
                self.user_id = Some(payload.user_id);
                self.lesson_id = Some(payload.lesson_id.clone());
                self.status = LessonStatus::NotStarted;
                self.created_at = Some(occurred_at);
                self.last_activity_at = Some(occurred_at);
            }
            ProgressEventKind::LessonMarkedInProgress(_) => {
                self.status = LessonStatus::InProgress;
            }
            ProgressEventKind::LessonCompleted(payload) => {
                self.status = LessonStatus::Completed;
                self.score = self.score.max(payload.score);
                self.xp_earned = self.xp_earned.saturating_add(payload.xp_earned);
                self.streak_maintained = payload.streak_maintained;
                self.completion_date = self.completion_date.max(Some(payload.completed_at));
                self.completion_count = self.completion_count.saturating_add(1);
                self.last_activity_at = self.last_activity_at.max(Some(occurred_at));
                self.vocabulary =
                    dedup_in_encounter_order(self.vocabulary.iter().chain(&payload.vocabulary));
            }
        }
        self.updated_at = Some(occurred_at);
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
