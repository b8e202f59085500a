//! Event-sourced aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An aggregate whose state is rebuilt by folding its event stream.
///
/// Commands record new events as uncommitted; the application layer persists
/// them through an [`EventRepository`](crate::repository::EventRepository)
/// and then clears them.
pub trait AggregateRoot: Send + Sync {
    /// The event envelope this aggregate records and replays.
    type Event: DomainEvent;

    /// Returns the aggregate identifier (the event stream id).
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of persisted events folded into this aggregate.
    fn version(&self) -> i64;

    /// Folds one persisted event into the aggregate state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events recorded by commands but not yet persisted.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drops the uncommitted events once they have been persisted.
    fn clear_uncommitted_events(&mut self);

    /// Returns `true` when a command produced something worth persisting.
    fn has_uncommitted_events(&self) -> bool {
        !self.uncommitted_events().is_empty()
    }
}
