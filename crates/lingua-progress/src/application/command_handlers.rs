//! Command handlers for the progress context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.

use lingua_core::aggregate::AggregateRoot;
use lingua_core::clock::Clock;
use lingua_core::error::DomainError;
use lingua_core::repository::{EventRepository, StoredEvent};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::LessonProgress;
use crate::domain::commands::{CompleteLesson, MarkLessonInProgress, StartLesson};
use crate::domain::events::{ProgressEvent, ProgressEventKind};

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct ProgressCommandResult {
    /// The aggregate ID affected or created by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted. Empty for no-op commands.
    pub stored_events: Vec<StoredEvent>,
}

/// Reconstitutes a `LessonProgress` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    progress_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<LessonProgress, DomainError> {
    let mut progress = LessonProgress::new(progress_id);
    for stored in existing_events {
        let kind: ProgressEventKind =
            serde_json::from_value(stored.payload.clone()).map_err(|e| {
                DomainError::Infrastructure(format!("event deserialization failed: {e}"))
            })?;
        let event = ProgressEvent {
            metadata: stored.metadata(),
            kind,
        };
        progress.apply(&event);
    }
    Ok(progress)
}

async fn load(
    progress_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<LessonProgress, DomainError> {
    let existing_events = repo.load_events(progress_id).await?;
    if existing_events.is_empty() {
        return Err(DomainError::AggregateNotFound(progress_id));
    }
    reconstitute(progress_id, &existing_events)
}

async fn persist(
    progress: &LessonProgress,
    repo: &dyn EventRepository,
) -> Result<ProgressCommandResult, DomainError> {
    let stored_events: Vec<StoredEvent> = progress
        .uncommitted_events()
        .iter()
        .map(StoredEvent::from_event)
        .collect();

    if !stored_events.is_empty() {
        repo.append_events(progress.id, progress.version(), &stored_events)
            .await?;
    }

    Ok(ProgressCommandResult {
        aggregate_id: progress.id,
        stored_events,
    })
}

/// The identifier of the one progress record per learner and lesson.
#[must_use]
pub fn progress_id_for(user_id: Uuid, lesson_id: &str) -> Uuid {
    Uuid::new_v5(&user_id, lesson_id.as_bytes())
}

/// Handles the `StartLesson` command: creates the learner's progress record
/// for the lesson and persists the resulting events. Starting a lesson that
/// already has a record returns that record and appends nothing.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank lesson id and `DomainError`
/// if event loading or appending fails.
pub async fn handle_start_lesson(
    command: &StartLesson,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ProgressCommandResult, DomainError> {
    let progress_id = progress_id_for(command.user_id, &command.lesson_id);
    let existing_events = repo.load_events(progress_id).await?;
    let mut progress = reconstitute(progress_id, &existing_events)?;

    if progress.version() > 0 {
        info!(%progress_id, lesson_id = %command.lesson_id, "lesson already started");
        return Ok(ProgressCommandResult {
            aggregate_id: progress_id,
            stored_events: Vec::new(),
        });
    }

    progress.start_lesson(
        command.user_id,
        &command.lesson_id,
        command.correlation_id,
        clock,
    )?;

    let result = persist(&progress, repo).await?;
    info!(%progress_id, lesson_id = %command.lesson_id, "lesson started");
    Ok(result)
}

/// Handles the `MarkLessonInProgress` command. Records past `not_started`
/// produce no events and nothing is appended.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the record tracks another lesson and
/// `DomainError` if event loading or appending fails.
pub async fn handle_mark_lesson_in_progress(
    command: &MarkLessonInProgress,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ProgressCommandResult, DomainError> {
    let mut progress = load(command.progress_id, repo).await?;

    progress.mark_in_progress(&command.lesson_id, command.correlation_id, clock)?;

    persist(&progress, repo).await
}

/// Handles the `CompleteLesson` command: reconstitutes the record, applies
/// the completion summary and persists the resulting events.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the summary is for another lesson and
/// `DomainError` if event loading or appending fails.
pub async fn handle_complete_lesson(
    command: &CompleteLesson,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<ProgressCommandResult, DomainError> {
    let mut progress = load(command.progress_id, repo).await?;

    progress.complete_lesson(&command.summary, command.correlation_id, clock)?;

    let result = persist(&progress, repo).await?;
    info!(
        progress_id = %command.progress_id,
        lesson_id = %command.summary.scenario_id,
        score = command.summary.score,
        xp_earned = command.summary.xp_earned,
        "lesson completed"
    );
    Ok(result)
}
