//! Integration tests for `PgEventRepository`.
//!
//! These need a `PostgreSQL` server: run with `DATABASE_URL` set and
//! `cargo test -- --ignored`.

use chrono::{TimeZone, Utc};
use lingua_core::error::DomainError;
use lingua_core::repository::{EventRepository, StoredEvent};
use lingua_event_store::PgEventRepository;
use sqlx::PgPool;
use uuid::Uuid;

fn progress_event(aggregate_id: Uuid, sequence_number: i64, event_type: &str) -> StoredEvent {
    StoredEvent {
        event_id: Uuid::new_v4(),
        aggregate_id,
        event_type: event_type.to_owned(),
        payload: serde_json::json!({ "LessonMarkedInProgress": { "progress_id": aggregate_id } }),
        sequence_number,
        correlation_id: Uuid::new_v4(),
        causation_id: Uuid::new_v4(),
        occurred_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unknown_stream_loads_empty(pool: PgPool) {
    let repo = PgEventRepository::new(pool);

    let events = repo.load_events(Uuid::new_v4()).await.unwrap();

    assert!(events.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_lesson_stream_round_trips_in_order(pool: PgPool) {
    // Arrange
    let repo = PgEventRepository::new(pool);
    let progress_id = Uuid::new_v4();
    let started = progress_event(progress_id, 1, "progress.lesson_started");
    let marked = progress_event(progress_id, 2, "progress.lesson_in_progress");
    let completed = progress_event(progress_id, 3, "progress.lesson_completed");

    // Act
    repo.append_events(progress_id, 0, &[started.clone(), marked.clone()])
        .await
        .unwrap();
    repo.append_events(progress_id, 2, &[completed.clone()])
        .await
        .unwrap();

    // Assert
    let loaded = repo.load_events(progress_id).await.unwrap();
    assert_eq!(loaded, vec![started, marked, completed]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_streams_are_isolated(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    repo.append_events(first, 0, &[progress_event(first, 1, "progress.lesson_started")])
        .await
        .unwrap();
    repo.append_events(second, 0, &[progress_event(second, 1, "progress.lesson_started")])
        .await
        .unwrap();

    assert_eq!(repo.load_events(first).await.unwrap()[0].aggregate_id, first);
    assert_eq!(repo.load_events(second).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_stale_writer_gets_concurrency_conflict(pool: PgPool) {
    // Arrange
    let repo = PgEventRepository::new(pool);
    let progress_id = Uuid::new_v4();
    repo.append_events(
        progress_id,
        0,
        &[
            progress_event(progress_id, 1, "progress.lesson_started"),
            progress_event(progress_id, 2, "progress.lesson_in_progress"),
        ],
    )
    .await
    .unwrap();

    // Act
    let result = repo
        .append_events(
            progress_id,
            1,
            &[progress_event(progress_id, 2, "progress.lesson_completed")],
        )
        .await;

    // Assert
    match result {
        Err(DomainError::ConcurrencyConflict {
            aggregate_id,
            expected,
            actual,
        }) => {
            assert_eq!(aggregate_id, progress_id);
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("expected ConcurrencyConflict, got {other:?}"),
    }
    assert_eq!(repo.load_events(progress_id).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_empty_append_writes_nothing(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let progress_id = Uuid::new_v4();

    repo.append_events(progress_id, 0, &[]).await.unwrap();

    assert!(repo.load_events(progress_id).await.unwrap().is_empty());
}
