//! Domain events for the progress context.

use chrono::{DateTime, Utc};
use lingua_core::event::{DomainEvent, EventMetadata};
use lingua_core::vocabulary::VocabularyWord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when a learner first engages a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonStarted {
    /// The progress record identifier.
    pub progress_id: Uuid,
    /// The learner.
    pub user_id: Uuid,
    /// The lesson (scenario) identifier.
    pub lesson_id: String,
}

/// Emitted on the learner's first choice in a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonMarkedInProgress {
    /// The progress record identifier.
    pub progress_id: Uuid,
}

/// Emitted when the dialogue engine reports a completed traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonCompleted {
    /// The progress record identifier.
    pub progress_id: Uuid,
    /// The language variant that was completed.
    pub language_code: String,
    /// Score of this run.
    pub score: u32,
    /// XP awarded for this run.
    pub xp_earned: u32,
    /// Vocabulary encountered on this run.
    pub vocabulary: Vec<VocabularyWord>,
    /// Whether this completion kept the learner's streak alive.
    pub streak_maintained: bool,
    /// When the lesson was completed.
    pub completed_at: DateTime<Utc>,
}

/// Event type identifier for [`LessonStarted`].
pub const LESSON_STARTED_EVENT_TYPE: &str = "progress.lesson_started";

/// Event type identifier for [`LessonMarkedInProgress`].
pub const LESSON_IN_PROGRESS_EVENT_TYPE: &str = "progress.lesson_in_progress";

/// Event type identifier for [`LessonCompleted`].
pub const LESSON_COMPLETED_EVENT_TYPE: &str = "progress.lesson_completed";

/// Event payload variants for the progress context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressEventKind {
    /// A lesson was started.
    LessonStarted(LessonStarted),
    /// The learner made a first choice.
    LessonMarkedInProgress(LessonMarkedInProgress),
    /// The lesson was completed.
    LessonCompleted(LessonCompleted),
}

/// Domain event envelope for the progress context.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: ProgressEventKind,
}

impl DomainEvent for ProgressEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            ProgressEventKind::LessonStarted(_) => LESSON_STARTED_EVENT_TYPE,
            ProgressEventKind::LessonMarkedInProgress(_) => LESSON_IN_PROGRESS_EVENT_TYPE,
            ProgressEventKind::LessonCompleted(_) => LESSON_COMPLETED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("ProgressEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
