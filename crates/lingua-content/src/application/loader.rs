//! Parsing scenario sources.

use std::path::Path;

use crate::domain::graph::ValidatedScenario;
use crate::domain::scenario::Scenario;
use crate::domain::validation::{ValidationOptions, validate};
use crate::error::ContentError;

/// Serialization format of a scenario source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
}

impl ContentFormat {
    /// Infers the format from a file extension (`json`, `yaml`, `yml`).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parses one scenario without validating it.
///
/// # Errors
///
/// Returns `ContentError::Parse` if `text` is not a scenario document.
pub fn parse_scenario(
    source_name: &str,
    text: &str,
    format: ContentFormat,
) -> Result<Scenario, ContentError> {
    let parsed = match format {
        ContentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        ContentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ContentError::Parse {
        source_name: source_name.to_owned(),
        message,
    })
}

/// Parses and validates one scenario.
///
/// # Errors
///
/// Returns `ContentError::Parse` for malformed sources and
/// `ContentError::Invalid` for scenarios that break content rules.
pub fn load_scenario(
    source_name: &str,
    text: &str,
    format: ContentFormat,
    options: &ValidationOptions,
) -> Result<ValidatedScenario, ContentError> {
    let scenario = parse_scenario(source_name, text, format)?;
    Ok(validate(scenario, options)?)
}

/// Reads, parses and validates one scenario file.
///
/// # Errors
///
/// Returns `ContentError::Io` if the file cannot be read, otherwise as
/// [`load_scenario`]. Files with an unknown extension are parse errors.
pub fn load_file(
    path: &Path,
    options: &ValidationOptions,
) -> Result<ValidatedScenario, ContentError> {
    let source_name = path.display().to_string();
    let format = ContentFormat::from_path(path).ok_or_else(|| ContentError::Parse {
        source_name: source_name.clone(),
        message: "unsupported file extension".to_owned(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_scenario(&source_name, &text, format, options)
}
