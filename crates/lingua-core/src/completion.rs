//! Completion contract between the dialogue engine and progress tracking.
//!
//! When a learner reaches a terminal state the dialogue context builds a
//! [`CompletionSummary`] and hands it to a [`ProgressSink`] exactly once. The
//! sink owns whatever persistence happens afterwards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::vocabulary::VocabularyWord;

/// Aggregate result of one completed scenario traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    /// The scenario that was completed.
    pub scenario_id: String,
    /// The language variant that was traversed.
    pub language_code: String,
    /// Number of segments entered, counting revisits.
    pub segments_visited: u32,
    /// Vocabulary seen along the path, first encounter order, no repeats.
    pub vocabulary_encountered: Vec<VocabularyWord>,
    /// Score accumulated from the chosen options.
    pub score: u32,
    /// Experience points awarded by the host's XP policy.
    pub xp_earned: u32,
    /// Rejected choices the host recorded during the session.
    pub invalid_attempts: u32,
}

/// Receives completion summaries, typically to update a progress record.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Records a completed traversal.
    async fn record_completion(&self, summary: &CompletionSummary) -> Result<(), DomainError>;
}
