//! Errors raised while loading scenario content.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::violation::ScenarioValidationError;

/// Failure to obtain a usable scenario.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The source could not be parsed into the scenario shape.
    #[error("could not parse `{source_name}`: {message}")]
    Parse {
        /// File name or label of the source.
        source_name: String,
        /// Parser message.
        message: String,
    },

    /// The source could not be read.
    #[error("could not read `{}`: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The scenario parsed but broke content invariants.
    #[error(transparent)]
    Invalid(#[from] ScenarioValidationError),

    /// Two sources declare the same scenario id.
    #[error("scenario `{scenario_id}` from `{source_name}` is already loaded")]
    DuplicateScenario {
        /// The repeated id.
        scenario_id: String,
        /// The source that was rejected.
        source_name: String,
    },

    /// No loaded scenario has the requested id.
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),
}
