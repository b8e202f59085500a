//! Compiled segment graphs.
//!
//! A [`ValidatedScenario`] only exists for content that passed validation.
//! Each language variant becomes a [`LanguageGraph`] whose option targets were
//! resolved to segment indices once, at load time.

use std::collections::{BTreeMap, HashMap};

use lingua_core::vocabulary::VocabularyWord;

use super::scenario::{DialogueOption, DialogueSegment, LanguageVariant, Scenario};

/// Where choosing an option leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// The segment at this index of the same graph.
    Segment(usize),
    /// No further segment; the scenario is complete on this path.
    Complete,
}

/// A segment together with the resolved target of each of its options.
#[derive(Debug, Clone)]
pub struct SegmentNode {
    segment: DialogueSegment,
    next: Vec<NextStep>,
}

impl SegmentNode {
    /// The authored segment.
    #[must_use]
    pub fn segment(&self) -> &DialogueSegment {
        &self.segment
    }

    /// The segment id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.segment.id
    }

    /// `true` for endpoint segments.
    #[must_use]
    pub fn is_endpoint(&self) -> bool {
        self.segment.is_endpoint
    }

    /// Options paired with where they lead, in display order.
    pub fn choices(&self) -> impl Iterator<Item = (&DialogueOption, NextStep)> {
        self.segment.options.iter().zip(self.next.iter().copied())
    }

    /// Looks up one option of this segment by id.
    #[must_use]
    pub fn choice(&self, option_id: &str) -> Option<(&DialogueOption, NextStep)> {
        self.choices().find(|(option, _)| option.id == option_id)
    }
}

/// One language variant compiled for traversal.
#[derive(Debug, Clone)]
pub struct LanguageGraph {
    code: String,
    name: String,
    nodes: Vec<SegmentNode>,
    index: HashMap<String, usize>,
}

impl LanguageGraph {
    /// Compiles a variant. Unknown targets compile to [`NextStep::Complete`];
    /// validation has already rejected them for loaded content.
    pub(crate) fn compile(variant: LanguageVariant) -> Self {
        let index: HashMap<String, usize> = variant
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| (segment.id.clone(), i))
            .collect();

        let nodes = variant
            .segments
            .into_iter()
            .map(|segment| {
                let next = segment
                    .options
                    .iter()
                    .map(|option| {
                        option
                            .next_segment_id
                            .as_deref()
                            .and_then(|target| index.get(target))
                            .map_or(NextStep::Complete, |&i| NextStep::Segment(i))
                    })
                    .collect();
                SegmentNode { segment, next }
            })
            .collect();

        Self {
            code: variant.code,
            name: variant.name,
            nodes,
            index,
        }
    }

    /// Language tag of this variant.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name of the language.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the entry segment.
    #[must_use]
    pub fn entry(&self) -> usize {
        0
    }

    /// The segment at `index`, if any.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&SegmentNode> {
        self.nodes.get(index)
    }

    /// Index of the segment with the given id.
    #[must_use]
    pub fn index_of(&self, segment_id: &str) -> Option<usize> {
        self.index.get(segment_id).copied()
    }

    /// All segments in authored order.
    #[must_use]
    pub fn nodes(&self) -> &[SegmentNode] {
        &self.nodes
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the graph has no segments. Never the case for validated
    /// content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every vocabulary word taught anywhere in this variant.
    pub fn vocabulary(&self) -> impl Iterator<Item = &VocabularyWord> {
        self.nodes
            .iter()
            .flat_map(|node| node.segment.options.iter())
            .flat_map(|option| option.vocabulary_words.iter())
    }
}

/// A scenario whose every language variant passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedScenario {
    id: String,
    title: String,
    description: String,
    image_url: String,
    version_hash: String,
    languages: BTreeMap<String, LanguageGraph>,
}

impl ValidatedScenario {
    pub(crate) fn compile(scenario: Scenario, version_hash: String) -> Self {
        let languages = scenario
            .languages
            .into_iter()
            .map(|variant| (variant.code.clone(), LanguageGraph::compile(variant)))
            .collect();

        Self {
            id: scenario.id,
            title: scenario.title,
            description: scenario.description,
            image_url: scenario.image_url,
            version_hash,
            languages,
        }
    }

    /// Scenario identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Display description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Cover image URL.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// SHA-256 of the authored content, hex encoded.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }

    /// The graph for one language code.
    #[must_use]
    pub fn language(&self, code: &str) -> Option<&LanguageGraph> {
        self.languages.get(code)
    }

    /// Available language codes, sorted.
    pub fn language_codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// All language graphs, sorted by code.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageGraph> {
        self.languages.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scenario::Character;

    fn segment(id: &str, options: Vec<DialogueOption>) -> DialogueSegment {
        DialogueSegment {
            id: id.to_owned(),
            character: Character {
                id: "vendor".to_owned(),
                name: "Vendor".to_owned(),
                avatar_url: String::new(),
            },
            text: String::new(),
            translation: String::new(),
            audio_url: None,
            is_endpoint: options.is_empty(),
            options,
        }
    }

    fn option(id: &str, next: Option<&str>) -> DialogueOption {
        DialogueOption {
            id: id.to_owned(),
            text: String::new(),
            response: String::new(),
            next_segment_id: next.map(str::to_owned),
            vocabulary_words: vec![VocabularyWord::new(id, id)],
            points: None,
        }
    }

    #[test]
    fn test_compile_resolves_targets_to_indices() {
        // Arrange
        let variant = LanguageVariant {
            code: "sw".to_owned(),
            name: "Swahili".to_owned(),
            segments: vec![
                segment("a", vec![option("a-1", Some("c")), option("a-2", None)]),
                segment("b", vec![]),
                segment("c", vec![option("c-1", Some("b"))]),
            ],
        };

        // Act
        let graph = LanguageGraph::compile(variant);

        // Assert
        let entry = graph.node(graph.entry()).unwrap();
        assert_eq!(entry.id(), "a");
        assert_eq!(entry.choice("a-1").unwrap().1, NextStep::Segment(2));
        assert_eq!(entry.choice("a-2").unwrap().1, NextStep::Complete);
        assert!(entry.choice("missing").is_none());
        assert_eq!(graph.index_of("b"), Some(1));
        assert_eq!(graph.vocabulary().count(), 3);
    }

    #[test]
    fn test_unknown_target_compiles_to_complete() {
        let variant = LanguageVariant {
            code: "sw".to_owned(),
            name: "Swahili".to_owned(),
            segments: vec![segment("a", vec![option("a-1", Some("nowhere"))])],
        };

        let graph = LanguageGraph::compile(variant);

        assert_eq!(
            graph.node(0).unwrap().choice("a-1").unwrap().1,
            NextStep::Complete
        );
    }
}
