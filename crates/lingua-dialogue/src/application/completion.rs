//! Turning a finished traversal into a completion summary.

use lingua_core::completion::{CompletionSummary, ProgressSink};
use lingua_core::vocabulary::dedup_in_encounter_order;
use tracing::{info, warn};

use crate::domain::traversal::Traversal;
use crate::domain::xp::{SessionOutcome, XpPolicy};
use crate::error::{DialogueError, ReportError};

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Summarizes a terminal traversal.
///
/// Vocabulary is deduplicated by `(word, translation)`, keeping the first
/// encounter's position.
///
/// # Errors
///
/// Returns `DialogueError::NotComplete` if the traversal is not terminal.
pub fn summarize(
    traversal: &Traversal,
    policy: &dyn XpPolicy,
) -> Result<CompletionSummary, DialogueError> {
    if !traversal.is_terminal() {
        return Err(DialogueError::NotComplete {
            scenario_id: traversal.scenario_id().to_owned(),
            language_code: traversal.language_code().to_owned(),
        });
    }

    let vocabulary_encountered = dedup_in_encounter_order(traversal.vocabulary());
    let segments_visited = saturating_u32(traversal.segments_visited());
    let outcome = SessionOutcome {
        segments_visited,
        score: traversal.score(),
        invalid_attempts: traversal.invalid_attempts(),
        vocabulary_count: saturating_u32(vocabulary_encountered.len()),
    };

    Ok(CompletionSummary {
        scenario_id: traversal.scenario_id().to_owned(),
        language_code: traversal.language_code().to_owned(),
        segments_visited,
        vocabulary_encountered,
        score: traversal.score(),
        xp_earned: policy.xp_for(&outcome),
        invalid_attempts: traversal.invalid_attempts(),
    })
}

/// Summarizes a terminal traversal and hands the summary to `sink` exactly
/// once.
///
/// # Errors
///
/// Returns `ReportError::Dialogue` if the traversal is not terminal (the sink
/// is not called) and `ReportError::Sink` if the sink fails.
pub async fn report_completion(
    traversal: &Traversal,
    policy: &dyn XpPolicy,
    sink: &dyn ProgressSink,
) -> Result<CompletionSummary, ReportError> {
    let summary = summarize(traversal, policy)?;

    if let Err(error) = sink.record_completion(&summary).await {
        warn!(
            scenario_id = %summary.scenario_id,
            language_code = %summary.language_code,
            %error,
            "progress sink rejected completion"
        );
        return Err(error.into());
    }

    info!(
        scenario_id = %summary.scenario_id,
        language_code = %summary.language_code,
        score = summary.score,
        xp_earned = summary.xp_earned,
        "completion reported"
    );
    Ok(summary)
}
