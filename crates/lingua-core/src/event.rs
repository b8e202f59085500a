//! Domain event envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Dotted type name, e.g. `progress.lesson_completed`.
    pub event_type: String,
    /// Stream the event belongs to.
    pub aggregate_id: Uuid,
    /// 1-based position within the stream.
    pub sequence_number: i64,
    /// Correlation ID of the originating command.
    pub correlation_id: Uuid,
    /// ID of the command or event that caused this one.
    pub causation_id: Uuid,
    /// When the event was recorded.
    pub occurred_at: DateTime<Utc>,
}

/// Implemented by every context's event envelope.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the dotted event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON for storage.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the envelope metadata.
    fn metadata(&self) -> &EventMetadata;
}
