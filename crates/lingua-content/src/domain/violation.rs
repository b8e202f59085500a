//! Validation failures reported to content authors.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// The invariant a piece of content broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// The scenario declares no language variants.
    NoLanguageVariants,
    /// Two variants share a language code.
    DuplicateLanguageCode,
    /// A variant has no segments.
    EmptyLanguageVariant,
    /// Two segments in a variant share an id.
    DuplicateSegmentId,
    /// Two options in a segment share an id.
    DuplicateOptionId,
    /// An option points at a segment id the variant does not define.
    DanglingNextSegment {
        /// The unresolved segment id.
        target: String,
    },
    /// An endpoint segment still offers options.
    EndpointWithOptions,
    /// A non-endpoint segment offers no options.
    SegmentWithoutOptions,
    /// The segment is the entry of a cycle and cycles are rejected.
    CycleDetected,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLanguageVariants => f.write_str("scenario has no language variants"),
            Self::DuplicateLanguageCode => f.write_str("language code is declared more than once"),
            Self::EmptyLanguageVariant => f.write_str("language variant has no segments"),
            Self::DuplicateSegmentId => f.write_str("segment id is declared more than once"),
            Self::DuplicateOptionId => f.write_str("option id is declared more than once"),
            Self::DanglingNextSegment { target } => {
                write!(f, "next segment `{target}` does not exist")
            }
            Self::EndpointWithOptions => f.write_str("endpoint segment must not have options"),
            Self::SegmentWithoutOptions => f.write_str("non-endpoint segment must have options"),
            Self::CycleDetected => f.write_str("segment is reachable from itself"),
        }
    }
}

/// One broken invariant, located as precisely as the rule allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Language variant the violation belongs to.
    pub language_code: Option<String>,
    /// Offending segment.
    pub segment_id: Option<String>,
    /// Offending option.
    pub option_id: Option<String>,
    /// The broken invariant.
    #[serde(flatten)]
    pub rule: Rule,
}

impl Violation {
    pub(crate) fn scenario(rule: Rule) -> Self {
        Self {
            language_code: None,
            segment_id: None,
            option_id: None,
            rule,
        }
    }

    pub(crate) fn language(code: &str, rule: Rule) -> Self {
        Self {
            language_code: Some(code.to_owned()),
            ..Self::scenario(rule)
        }
    }

    pub(crate) fn segment(code: &str, segment_id: &str, rule: Rule) -> Self {
        Self {
            segment_id: Some(segment_id.to_owned()),
            ..Self::language(code, rule)
        }
    }

    pub(crate) fn option(code: &str, segment_id: &str, option_id: &str, rule: Rule) -> Self {
        Self {
            option_id: Some(option_id.to_owned()),
            ..Self::segment(code, segment_id, rule)
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location: Vec<&str> = [&self.language_code, &self.segment_id, &self.option_id]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect();
        if location.is_empty() {
            write!(f, "{}", self.rule)
        } else {
            write!(f, "[{}] {}", location.join("/"), self.rule)
        }
    }
}

/// A scenario rejected at load time, with every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("scenario `{scenario_id}` failed validation with {} violation(s)", .violations.len())]
pub struct ScenarioValidationError {
    /// The rejected scenario.
    pub scenario_id: String,
    /// Every violation, in discovery order.
    pub violations: Vec<Violation>,
}

impl ScenarioValidationError {
    /// Returns the violations reported against `segment_id` in any language.
    pub fn for_segment<'a>(&'a self, segment_id: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations
            .iter()
            .filter(move |v| v.segment_id.as_deref() == Some(segment_id))
    }
}
