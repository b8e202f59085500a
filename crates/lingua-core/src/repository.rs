//! Event repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::event::{DomainEvent, EventMetadata};

/// Persisted form of a domain event.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Stream the event belongs to.
    pub aggregate_id: Uuid,
    /// Dotted event type name.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// 1-based position within the stream.
    pub sequence_number: i64,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// ID of the causing command or event.
    pub causation_id: Uuid,
    /// When the event was recorded.
    pub occurred_at: DateTime<Utc>,
}

impl StoredEvent {
    /// Builds the stored form of any domain event.
    pub fn from_event<E: DomainEvent>(event: &E) -> Self {
        let meta = event.metadata();
        Self {
            event_id: meta.event_id,
            aggregate_id: meta.aggregate_id,
            event_type: event.event_type().to_owned(),
            payload: event.to_payload(),
            sequence_number: meta.sequence_number,
            correlation_id: meta.correlation_id,
            causation_id: meta.causation_id,
            occurred_at: meta.occurred_at,
        }
    }

    /// Rebuilds the envelope metadata of this stored event.
    #[must_use]
    pub fn metadata(&self) -> EventMetadata {
        EventMetadata {
            event_id: self.event_id,
            event_type: self.event_type.clone(),
            aggregate_id: self.aggregate_id,
            sequence_number: self.sequence_number,
            correlation_id: self.correlation_id,
            causation_id: self.causation_id,
            occurred_at: self.occurred_at,
        }
    }
}

/// Loads and appends event streams.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Loads all events of a stream ordered by sequence number.
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError>;

    /// Appends events to a stream. `expected_version` is the last sequence
    /// number the writer saw; a mismatch is a `ConcurrencyConflict`.
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError>;
}
