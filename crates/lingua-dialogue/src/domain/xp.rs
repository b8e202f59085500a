//! Experience point policies.

use serde::{Deserialize, Serialize};

/// XP awarded by [`FlatXp::default`].
pub const DEFAULT_BASE_XP: u32 = 10;

/// What a finished traversal looked like, as input to an [`XpPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Segments shown, entry segment included.
    pub segments_visited: u32,
    /// Accumulated option points.
    pub score: u32,
    /// Rejected choices counted by the caller.
    pub invalid_attempts: u32,
    /// Distinct words encountered.
    pub vocabulary_count: u32,
}

/// Decides how much XP a completed session earns.
pub trait XpPolicy: Send + Sync {
    /// XP earned for the given outcome.
    fn xp_for(&self, outcome: &SessionOutcome) -> u32;
}

impl<F> XpPolicy for F
where
    F: Fn(&SessionOutcome) -> u32 + Send + Sync,
{
    fn xp_for(&self, outcome: &SessionOutcome) -> u32 {
        self(outcome)
    }
}

/// The same award for every completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatXp {
    /// XP per completion.
    pub base: u32,
}

impl Default for FlatXp {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_XP,
        }
    }
}

impl XpPolicy for FlatXp {
    fn xp_for(&self, _outcome: &SessionOutcome) -> u32 {
        self.base
    }
}

/// A base award plus a bonus when no invalid choice was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerfectRunBonus {
    /// XP per completion.
    pub base: u32,
    /// Extra XP for a run without invalid attempts.
    pub bonus: u32,
}

impl XpPolicy for PerfectRunBonus {
    fn xp_for(&self, outcome: &SessionOutcome) -> u32 {
        if outcome.invalid_attempts == 0 {
            self.base.saturating_add(self.bonus)
        } else {
            self.base
        }
    }
}
