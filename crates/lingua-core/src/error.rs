//! Domain error types shared by the event-sourced contexts.

use thiserror::Error;
use uuid::Uuid;

/// Error returned by aggregates, command handlers and repositories.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No events exist for the requested aggregate.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(Uuid),

    /// Another writer appended to the stream first.
    #[error(
        "concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The version the writer loaded.
        expected: i64,
        /// The version currently stored.
        actual: i64,
    },

    /// A command was rejected by domain rules.
    #[error("validation error: {0}")]
    Validation(String),

    /// Storage or serialization failed.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
