//! Event store adapters for the Lingua progress records.
//!
//! [`PgEventRepository`] persists streams in `PostgreSQL`;
//! [`InMemoryEventRepository`] keeps them in process for local runs and tests.

pub mod in_memory_event_repository;
pub mod pg_event_repository;

pub use in_memory_event_repository::InMemoryEventRepository;
pub use pg_event_repository::PgEventRepository;

/// Schema migrations for the `domain_events` table.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
