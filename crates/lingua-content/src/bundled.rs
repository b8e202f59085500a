//! Scenarios shipped with the application.

use crate::application::loader::{ContentFormat, load_scenario};
use crate::domain::graph::ValidatedScenario;
use crate::domain::validation::ValidationOptions;
use crate::error::ContentError;

/// `market-basics-001`: buying oranges, Swahili and French.
pub const MARKET_BASICS: &str = include_str!("../content/market-basics-001.json");

/// `greetings-001`: meeting a neighbour, Swahili.
pub const GREETINGS: &str = include_str!("../content/greetings-001.yaml");

/// Every bundled source as `(name, format, text)`.
pub const SOURCES: [(&str, ContentFormat, &str); 2] = [
    ("market-basics-001.json", ContentFormat::Json, MARKET_BASICS),
    ("greetings-001.yaml", ContentFormat::Yaml, GREETINGS),
];

/// Loads the bundled `market-basics-001` scenario.
///
/// # Errors
///
/// Only if the bundled content is broken, which the crate's tests rule out.
pub fn market_basics() -> Result<ValidatedScenario, ContentError> {
    load_scenario(
        "market-basics-001.json",
        MARKET_BASICS,
        ContentFormat::Json,
        &ValidationOptions::default(),
    )
}

/// Loads the bundled `greetings-001` scenario.
///
/// # Errors
///
/// Only if the bundled content is broken, which the crate's tests rule out.
pub fn greetings() -> Result<ValidatedScenario, ContentError> {
    load_scenario(
        "greetings-001.yaml",
        GREETINGS,
        ContentFormat::Yaml,
        &ValidationOptions::default(),
    )
}
