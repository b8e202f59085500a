//! Dialogue errors.
//!
//! All of them are recoverable by the caller: a failed `advance` leaves the
//! traversal it was called on untouched.

use lingua_core::error::DomainError;
use thiserror::Error;

/// Rejected traversal operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    /// The option id is not offered by the current segment.
    #[error("option `{option_id}` is not available at segment `{segment_id}`")]
    InvalidChoice {
        /// The current segment.
        segment_id: String,
        /// The rejected option id.
        option_id: String,
    },

    /// The traversal already reached a terminal state.
    #[error("scenario `{scenario_id}` ({language_code}) is already complete")]
    AlreadyComplete {
        /// The scenario being traversed.
        scenario_id: String,
        /// The language variant being traversed.
        language_code: String,
    },

    /// The scenario has no variant for the requested language.
    #[error("scenario `{scenario_id}` has no `{language_code}` variant")]
    UnknownLanguageVariant {
        /// The scenario that was asked.
        scenario_id: String,
        /// The missing language code.
        language_code: String,
    },

    /// The traversal was advanced against a different scenario than it
    /// started on.
    #[error("traversal belongs to scenario `{expected}`, not `{actual}`")]
    ScenarioMismatch {
        /// The scenario the traversal started on.
        expected: String,
        /// The scenario it was advanced against.
        actual: String,
    },

    /// Completion was requested before reaching a terminal state.
    #[error("scenario `{scenario_id}` ({language_code}) is not complete yet")]
    NotComplete {
        /// The scenario being traversed.
        scenario_id: String,
        /// The language variant being traversed.
        language_code: String,
    },
}

/// Failure to report a completed traversal.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The traversal cannot be summarized.
    #[error(transparent)]
    Dialogue(#[from] DialogueError),

    /// The progress sink rejected the summary.
    #[error("progress sink failed: {0}")]
    Sink(#[from] DomainError),
}
