//! Command abstraction.

use uuid::Uuid;

/// Implemented by every command handled by an application layer.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable dotted name of the command, used in logs.
    fn command_type(&self) -> &'static str;

    /// Correlation ID carried into every event the command produces.
    fn correlation_id(&self) -> Uuid;
}
