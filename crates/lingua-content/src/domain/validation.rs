//! Scenario validation.
//!
//! Every rule is checked and every violation collected, so a content author
//! sees all problems of a file at once. Only fully valid scenarios compile
//! into a [`ValidatedScenario`].

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::graph::ValidatedScenario;
use super::scenario::{LanguageVariant, Scenario};
use super::violation::{Rule, ScenarioValidationError, Violation};

/// What to do with segment graphs that contain cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Accept loop-back conversations; each cycle is logged.
    #[default]
    Allow,
    /// Reject the scenario with a `cycle_detected` violation per cycle entry.
    Reject,
}

impl CyclePolicy {
    /// Parses `allow` or `reject`, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "allow" => Some(Self::Allow),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Knobs for [`validate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Treatment of cyclic segment graphs.
    pub cycle_policy: CyclePolicy,
}

/// Validates a scenario and compiles it for traversal.
///
/// # Errors
///
/// Returns `ScenarioValidationError` listing every violation if any rule is
/// broken.
pub fn validate(
    scenario: Scenario,
    options: &ValidationOptions,
) -> Result<ValidatedScenario, ScenarioValidationError> {
    let violations = check_scenario(&scenario, options);
    if !violations.is_empty() {
        warn!(
            scenario_id = %scenario.id,
            violations = violations.len(),
            "scenario rejected"
        );
        return Err(ScenarioValidationError {
            scenario_id: scenario.id,
            violations,
        });
    }

    let version_hash = version_hash(&scenario);
    debug!(scenario_id = %scenario.id, %version_hash, "scenario validated");
    Ok(ValidatedScenario::compile(scenario, version_hash))
}

/// SHA-256 over the canonical JSON form of the scenario.
fn version_hash(scenario: &Scenario) -> String {
    // Serialization of derived Serialize types to bytes is infallible.
    let canonical = serde_json::to_vec(scenario).expect("Scenario serialization is infallible");
    format!("{:x}", Sha256::digest(&canonical))
}

fn check_scenario(scenario: &Scenario, options: &ValidationOptions) -> Vec<Violation> {
    let mut violations = Vec::new();

    if scenario.languages.is_empty() {
        violations.push(Violation::scenario(Rule::NoLanguageVariants));
    }

    let mut codes = HashSet::new();
    for variant in &scenario.languages {
        if !codes.insert(variant.code.as_str()) {
            violations.push(Violation::language(
                &variant.code,
                Rule::DuplicateLanguageCode,
            ));
        }
        check_variant(&scenario.id, variant, options, &mut violations);
    }

    violations
}

fn check_variant(
    scenario_id: &str,
    variant: &LanguageVariant,
    options: &ValidationOptions,
    violations: &mut Vec<Violation>,
) {
    let code = variant.code.as_str();
    if variant.segments.is_empty() {
        violations.push(Violation::language(code, Rule::EmptyLanguageVariant));
        return;
    }

    let mut segment_ids = HashSet::new();
    let mut duplicate_segments = false;
    for segment in &variant.segments {
        if !segment_ids.insert(segment.id.as_str()) {
            duplicate_segments = true;
            violations.push(Violation::segment(code, &segment.id, Rule::DuplicateSegmentId));
        }
    }

    for segment in &variant.segments {
        if segment.is_endpoint && !segment.options.is_empty() {
            violations.push(Violation::segment(code, &segment.id, Rule::EndpointWithOptions));
        }
        if !segment.is_endpoint && segment.options.is_empty() {
            violations.push(Violation::segment(code, &segment.id, Rule::SegmentWithoutOptions));
        }

        let mut option_ids = HashSet::new();
        for option in &segment.options {
            if !option_ids.insert(option.id.as_str()) {
                violations.push(Violation::option(
                    code,
                    &segment.id,
                    &option.id,
                    Rule::DuplicateOptionId,
                ));
            }
            if let Some(target) = option.next_segment_id.as_deref() {
                if !segment_ids.contains(target) {
                    violations.push(Violation::option(
                        code,
                        &segment.id,
                        &option.id,
                        Rule::DanglingNextSegment {
                            target: target.to_owned(),
                        },
                    ));
                }
            }
        }
    }

    // Graph checks below need unique segment ids. Dangling targets are
    // dropped from the adjacency lists.
    if duplicate_segments {
        return;
    }

    let adjacency = adjacency(variant);

    for entry in cycle_entries(&adjacency) {
        let segment_id = &variant.segments[entry].id;
        match options.cycle_policy {
            CyclePolicy::Allow => {
                warn!(
                    scenario_id,
                    language = code,
                    segment_id = %segment_id,
                    "segment graph contains a cycle"
                );
            }
            CyclePolicy::Reject => {
                violations.push(Violation::segment(code, segment_id, Rule::CycleDetected));
            }
        }
    }

    for index in unreachable_from_entry(&adjacency) {
        warn!(
            scenario_id,
            language = code,
            segment_id = %variant.segments[index].id,
            "segment is unreachable from the entry segment"
        );
    }
}

/// Successor indices of every segment. Assumes ids are unique; targets that
/// do not resolve are skipped.
fn adjacency(variant: &LanguageVariant) -> Vec<Vec<usize>> {
    let index: HashMap<&str, usize> = variant
        .segments
        .iter()
        .enumerate()
        .map(|(i, segment)| (segment.id.as_str(), i))
        .collect();

    variant
        .segments
        .iter()
        .map(|segment| {
            segment
                .options
                .iter()
                .filter_map(|option| option.next_segment_id.as_deref())
                .filter_map(|target| index.get(target).copied())
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Segments entered by a back edge during depth-first search, i.e. one
/// segment per cycle entry point.
fn cycle_entries(adjacency: &[Vec<usize>]) -> BTreeSet<usize> {
    let mut marks = vec![Mark::Unvisited; adjacency.len()];
    let mut entries = BTreeSet::new();

    for root in 0..adjacency.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::OnPath;
        let mut stack = vec![(root, 0_usize)];

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let Some(&next) = adjacency[node].get(frame.1) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[next] {
                Mark::Unvisited => {
                    marks[next] = Mark::OnPath;
                    stack.push((next, 0));
                }
                Mark::OnPath => {
                    entries.insert(next);
                }
                Mark::Done => {}
            }
        }
    }

    entries
}

fn unreachable_from_entry(adjacency: &[Vec<usize>]) -> Vec<usize> {
    let mut seen = vec![false; adjacency.len()];
    let mut queue = VecDeque::from([0]);
    seen[0] = true;

    while let Some(node) = queue.pop_front() {
        for &next in &adjacency[node] {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }

    seen.iter()
        .enumerate()
        .filter(|(_, reached)| !**reached)
        .map(|(i, _)| i)
        .collect()
}
