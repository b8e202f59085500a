//! Shared application state.

use std::sync::Arc;

use lingua_content::ScenarioCatalog;
use lingua_core::clock::Clock;
use lingua_core::repository::EventRepository;
use lingua_dialogue::XpPolicy;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Time source for progress events.
    pub clock: Arc<dyn Clock>,
    /// Progress record event streams.
    pub event_repository: Arc<dyn EventRepository>,
    /// Validated scenarios, loaded once at startup.
    pub catalog: Arc<ScenarioCatalog>,
    /// XP awarded on completion.
    pub xp_policy: Arc<dyn XpPolicy>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        event_repository: Arc<dyn EventRepository>,
        catalog: Arc<ScenarioCatalog>,
        xp_policy: Arc<dyn XpPolicy>,
    ) -> Self {
        Self {
            clock,
            event_repository,
            catalog,
            xp_policy,
        }
    }
}
