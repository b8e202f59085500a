//! Shared test mocks and utilities for the Lingua dialogue engine.

mod clock;
mod repository;
mod sink;

pub use clock::{FixedClock, fixed_now};
pub use repository::{EmptyEventRepository, FailingEventRepository, RecordingEventRepository};
pub use sink::{FailingProgressSink, RecordingProgressSink};
