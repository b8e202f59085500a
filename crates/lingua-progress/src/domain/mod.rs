//! Domain layer for the progress context.

pub mod aggregates;
pub mod commands;
pub mod events;
