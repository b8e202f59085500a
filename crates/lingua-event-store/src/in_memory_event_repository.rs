//! Process-local `EventRepository` for running without a database.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use lingua_core::error::DomainError;
use lingua_core::repository::{EventRepository, StoredEvent};

/// Keeps every stream in memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: RwLock<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> DomainError {
    DomainError::Infrastructure("in-memory event store lock poisoned".into())
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.streams.read().map_err(|_| poisoned())?;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }
        let mut streams = self.streams.write().map_err(|_| poisoned())?;
        let stream = streams.entry(aggregate_id).or_default();
        let actual = stream.last().map_or(0, |event| event.sequence_number);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }
        stream.extend_from_slice(events);
        Ok(())
    }
}
