//! Lingua — scenario content.
//!
//! Responsible for parsing authored scenario files (JSON or YAML), validating
//! every language variant's segment graph, compiling validated variants into
//! index-linked graphs for traversal, and holding the loaded scenarios in a
//! read-only catalog.

pub mod application;
pub mod bundled;
pub mod domain;
pub mod error;

pub use application::catalog::{LoadReport, RejectedSource, ScenarioCatalog};
pub use application::loader::{ContentFormat, load_file, load_scenario, parse_scenario};
pub use domain::graph::{LanguageGraph, NextStep, SegmentNode, ValidatedScenario};
pub use domain::scenario::{Character, DialogueOption, DialogueSegment, LanguageVariant, Scenario};
pub use domain::validation::{CyclePolicy, ValidationOptions, validate};
pub use domain::violation::{Rule, ScenarioValidationError, Violation};
pub use error::ContentError;
pub use lingua_core::vocabulary::VocabularyWord;
