//! Application layer for the progress context.

pub mod command_handlers;
pub mod query_handlers;
pub mod tracker;
