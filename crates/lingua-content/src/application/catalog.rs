//! The scenario catalog.
//!
//! Loaded once at startup and shared read-only. A source that fails to load
//! is reported and skipped; the remaining scenarios stay usable.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::loader::{ContentFormat, load_file, load_scenario};
use crate::bundled;
use crate::domain::graph::ValidatedScenario;
use crate::domain::validation::ValidationOptions;
use crate::error::ContentError;

/// A source that could not be added to the catalog.
#[derive(Debug)]
pub struct RejectedSource {
    /// File name or label of the source.
    pub source_name: String,
    /// Why it was rejected.
    pub error: ContentError,
}

/// Outcome of loading many sources.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Ids of the scenarios added, in load order.
    pub loaded: Vec<String>,
    /// Sources that were skipped.
    pub rejected: Vec<RejectedSource>,
}

impl LoadReport {
    fn record(&mut self, source_name: &str, result: Result<String, ContentError>) {
        match result {
            Ok(scenario_id) => {
                info!(source = source_name, %scenario_id, "scenario loaded");
                self.loaded.push(scenario_id);
            }
            Err(error) => {
                warn!(source = source_name, %error, "scenario source rejected");
                self.rejected.push(RejectedSource {
                    source_name: source_name.to_owned(),
                    error,
                });
            }
        }
    }
}

/// Validated scenarios keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    scenarios: BTreeMap<String, Arc<ValidatedScenario>>,
}

impl ScenarioCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the scenarios compiled into this crate.
    #[must_use]
    pub fn bundled(options: &ValidationOptions) -> (Self, LoadReport) {
        Self::from_sources(
            bundled::SOURCES
                .iter()
                .map(|(name, format, text)| ((*name).to_owned(), *format, *text)),
            options,
        )
    }

    /// Loads scenarios from in-memory sources.
    pub fn from_sources<'a, I>(sources: I, options: &ValidationOptions) -> (Self, LoadReport)
    where
        I: IntoIterator<Item = (String, ContentFormat, &'a str)>,
    {
        let mut catalog = Self::new();
        let mut report = LoadReport::default();
        for (source_name, format, text) in sources {
            let result = load_scenario(&source_name, text, format, options)
                .and_then(|scenario| catalog.insert(&source_name, scenario));
            report.record(&source_name, result);
        }
        (catalog, report)
    }

    /// Loads every `.json`, `.yaml` and `.yml` file of a directory, in file
    /// name order. Other files are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Io` if the directory itself cannot be listed.
    /// Unreadable or invalid files end up in the report instead.
    pub fn load_dir(
        dir: &Path,
        options: &ValidationOptions,
    ) -> Result<(Self, LoadReport), ContentError> {
        let io_error = |source| ContentError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && ContentFormat::from_path(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut catalog = Self::new();
        let mut report = LoadReport::default();
        for path in paths {
            let source_name = path.display().to_string();
            let result = load_file(&path, options)
                .and_then(|scenario| catalog.insert(&source_name, scenario));
            report.record(&source_name, result);
        }
        Ok((catalog, report))
    }

    /// Adds a scenario, returning its id.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::DuplicateScenario` if the id is already taken.
    pub fn insert(
        &mut self,
        source_name: &str,
        scenario: ValidatedScenario,
    ) -> Result<String, ContentError> {
        let scenario_id = scenario.id().to_owned();
        if self.scenarios.contains_key(&scenario_id) {
            return Err(ContentError::DuplicateScenario {
                scenario_id,
                source_name: source_name.to_owned(),
            });
        }
        self.scenarios
            .insert(scenario_id.clone(), Arc::new(scenario));
        Ok(scenario_id)
    }

    /// Looks up a scenario by id.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::ScenarioNotFound` for unknown ids.
    pub fn get(&self, scenario_id: &str) -> Result<Arc<ValidatedScenario>, ContentError> {
        self.scenarios
            .get(scenario_id)
            .cloned()
            .ok_or_else(|| ContentError::ScenarioNotFound(scenario_id.to_owned()))
    }

    /// All scenarios, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ValidatedScenario>> {
        self.scenarios.values()
    }

    /// Number of loaded scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// `true` if nothing was loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
