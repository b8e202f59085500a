//! Mock `ProgressSink` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use lingua_core::completion::{CompletionSummary, ProgressSink};
use lingua_core::error::DomainError;

/// A progress sink that keeps every summary it receives.
#[derive(Debug, Default)]
pub struct RecordingProgressSink {
    received: Mutex<Vec<CompletionSummary>>,
}

impl RecordingProgressSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the summaries received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn received(&self) -> Vec<CompletionSummary> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressSink for RecordingProgressSink {
    async fn record_completion(&self, summary: &CompletionSummary) -> Result<(), DomainError> {
        self.received.lock().unwrap().push(summary.clone());
        Ok(())
    }
}

/// A progress sink that always fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingProgressSink;

#[async_trait]
impl ProgressSink for FailingProgressSink {
    async fn record_completion(&self, _summary: &CompletionSummary) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("progress store unavailable".into()))
    }
}
