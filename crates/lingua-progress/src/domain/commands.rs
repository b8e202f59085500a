//! Commands for the progress context.

use lingua_core::command::Command;
use lingua_core::completion::CompletionSummary;
use uuid::Uuid;

/// Command to create a progress record for a learner and a lesson.
#[derive(Debug, Clone)]
pub struct StartLesson {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The learner.
    pub user_id: Uuid,
    /// The lesson (scenario) to track.
    pub lesson_id: String,
}

impl Command for StartLesson {
    fn command_type(&self) -> &'static str {
        "progress.start_lesson"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record the learner's first choice.
#[derive(Debug, Clone)]
pub struct MarkLessonInProgress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The progress record identifier.
    pub progress_id: Uuid,
    /// The scenario being traversed; must match the record's lesson.
    pub lesson_id: String,
}

impl Command for MarkLessonInProgress {
    fn command_type(&self) -> &'static str {
        "progress.mark_lesson_in_progress"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record a completed traversal.
#[derive(Debug, Clone)]
pub struct CompleteLesson {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The progress record identifier.
    pub progress_id: Uuid,
    /// What the dialogue engine reported.
    pub summary: CompletionSummary,
}

impl Command for CompleteLesson {
    fn command_type(&self) -> &'static str {
        "progress.complete_lesson"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
