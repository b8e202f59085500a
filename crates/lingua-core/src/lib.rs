//! Lingua Core — shared domain abstractions.
//!
//! Defines the traits and value types that the content, dialogue and progress
//! contexts agree on: clocks, domain errors, event envelopes, the event
//! repository port, and the completion contract between a finished dialogue
//! and whoever tracks learner progress. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod completion;
pub mod error;
pub mod event;
pub mod repository;
pub mod vocabulary;
