//! Route modules organized by bounded context.

pub mod health;
pub mod progress;
pub mod scenarios;

#[cfg(test)]
pub(crate) fn test_state(
    event_repository: std::sync::Arc<dyn lingua_core::repository::EventRepository>,
) -> crate::state::AppState {
    use std::sync::Arc;

    use lingua_content::{ScenarioCatalog, ValidationOptions};
    use lingua_dialogue::FlatXp;
    use lingua_test_support::{FixedClock, fixed_now};

    let (catalog, _) = ScenarioCatalog::bundled(&ValidationOptions::default());
    crate::state::AppState::new(
        Arc::new(FixedClock(fixed_now())),
        event_repository,
        Arc::new(catalog),
        Arc::new(FlatXp::default()),
    )
}
