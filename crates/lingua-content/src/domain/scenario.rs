//! Authored scenario shape, as it appears in content files.
//!
//! Field names follow the content files (`camelCase`). Nothing here is
//! validated; see [`validate`](super::validation::validate).

use lingua_core::vocabulary::VocabularyWord;
use serde::{Deserialize, Serialize};

/// A named, multi-language conversational exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Globally unique scenario identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Cover image, resolved by the host application.
    pub image_url: String,
    /// One segment graph per target language.
    pub languages: Vec<LanguageVariant>,
}

/// One language's complete segment graph for a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageVariant {
    /// Language tag, unique within the scenario (e.g. `sw`).
    pub code: String,
    /// Display name of the language.
    pub name: String,
    /// Segments in authored order; the first one is the entry point.
    pub segments: Vec<DialogueSegment>,
}

/// The speaker of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Character identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar image, resolved by the host application.
    pub avatar_url: String,
}

/// One conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueSegment {
    /// Identifier, unique within the language variant.
    pub id: String,
    /// Who speaks this turn.
    pub character: Character,
    /// The line in the target language.
    pub text: String,
    /// The line in the learner's language.
    pub translation: String,
    /// Optional recording of the line.
    #[serde(default)]
    pub audio_url: Option<String>,
    /// Choices offered to the learner, in display order.
    #[serde(default)]
    pub options: Vec<DialogueOption>,
    /// Marks the end of the conversation.
    #[serde(default)]
    pub is_endpoint: bool,
}

/// A learner-selectable choice within a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueOption {
    /// Identifier, unique within the segment.
    pub id: String,
    /// What the learner says.
    pub text: String,
    /// The in-character reply shown before the next segment.
    pub response: String,
    /// Segment this choice leads to; `None` ends the scenario on this path.
    #[serde(default)]
    pub next_segment_id: Option<String>,
    /// Words taught by this choice.
    #[serde(default)]
    pub vocabulary_words: Vec<VocabularyWord>,
    /// Score awarded for this choice; one point when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

impl DialogueOption {
    /// Score contribution of choosing this option.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.points.unwrap_or(1)
    }
}
