//! Lingua — learner progress bounded context.
//!
//! Responsible for the per-lesson progress record: creation when a learner
//! first engages a lesson, the move to `in_progress` on the first choice, and
//! completions reported by the dialogue engine with score, XP and streak.

pub mod application;
pub mod domain;

pub use application::command_handlers::{
    ProgressCommandResult, handle_complete_lesson, handle_mark_lesson_in_progress,
    handle_start_lesson, progress_id_for,
};
pub use application::query_handlers::{ProgressRecordView, get_progress_by_id};
pub use application::tracker::ProgressTracker;
pub use domain::aggregates::{LessonProgress, LessonStatus};
pub use domain::commands::{CompleteLesson, MarkLessonInProgress, StartLesson};
