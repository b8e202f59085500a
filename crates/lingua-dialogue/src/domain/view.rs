//! Read-only projections of a traversal for presentation layers.

use lingua_content::{SegmentNode, ValidatedScenario};
use lingua_core::vocabulary::VocabularyWord;
use serde::Serialize;

use super::traversal::Traversal;

/// Who is speaking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerView {
    /// Character identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

/// A selectable option. Targets and vocabulary stay hidden until chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    /// Option identifier, sent back to advance.
    pub id: String,
    /// What the learner says, in the target language.
    pub text: String,
}

/// The segment the learner is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentView {
    /// Segment identifier.
    pub id: String,
    /// The character delivering the line.
    pub speaker: SpeakerView,
    /// The line in the target language.
    pub text: String,
    /// The line in the learner's language.
    pub translation: String,
    /// Recorded audio, if any.
    pub audio_url: Option<String>,
    /// Whether the conversation ends here.
    pub is_endpoint: bool,
    /// Choices offered, in authored order.
    pub options: Vec<OptionView>,
}

impl From<&SegmentNode> for SegmentView {
    fn from(node: &SegmentNode) -> Self {
        let segment = node.segment();
        Self {
            id: segment.id.clone(),
            speaker: SpeakerView {
                id: segment.character.id.clone(),
                name: segment.character.name.clone(),
                avatar_url: segment.character.avatar_url.clone(),
            },
            text: segment.text.clone(),
            translation: segment.translation.clone(),
            audio_url: segment.audio_url.clone(),
            is_endpoint: segment.is_endpoint,
            options: segment
                .options
                .iter()
                .map(|option| OptionView {
                    id: option.id.clone(),
                    text: option.text.clone(),
                })
                .collect(),
        }
    }
}

/// Snapshot of a traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalView {
    /// The scenario being traversed.
    pub scenario_id: String,
    /// The language variant being traversed.
    pub language_code: String,
    /// `None` once an option without a next segment was chosen.
    pub segment: Option<SegmentView>,
    /// Whether no further choice is accepted.
    pub is_terminal: bool,
    /// Option ids chosen so far, oldest first.
    pub choices: Vec<String>,
    /// Words encountered so far, duplicates kept.
    pub vocabulary: Vec<VocabularyWord>,
    /// Accumulated option points.
    pub score: u32,
    /// Segments shown, entry segment included.
    pub segments_visited: usize,
    /// Rejected choices counted by the caller.
    pub invalid_attempts: u32,
}

impl Traversal {
    /// Projects the traversal for display.
    #[must_use]
    pub fn view(&self, scenario: &ValidatedScenario) -> TraversalView {
        TraversalView {
            scenario_id: self.scenario_id().to_owned(),
            language_code: self.language_code().to_owned(),
            segment: self.current_segment(scenario).map(SegmentView::from),
            is_terminal: self.is_terminal(),
            choices: self.choices().to_vec(),
            vocabulary: self.vocabulary().to_vec(),
            score: self.score(),
            segments_visited: self.segments_visited(),
            invalid_attempts: self.invalid_attempts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use lingua_content::bundled;

    use super::*;

    #[test]
    fn test_view_of_entry_segment_hides_option_targets() {
        // Arrange
        let scenario = bundled::market_basics().unwrap();
        let traversal = Traversal::start(&scenario, "sw").unwrap();

        // Act
        let view = traversal.view(&scenario);

        // Assert
        let segment = view.segment.unwrap();
        assert_eq!(segment.id, "sw-1");
        assert_eq!(segment.speaker.name, "Mama Amina");
        assert_eq!(segment.audio_url.as_deref(), Some("/audio/market/sw-1.mp3"));
        assert_eq!(
            segment.options,
            vec![OptionView {
                id: "sw-1-a".to_owned(),
                text: "Nataka machungwa, tafadhali.".to_owned(),
            }]
        );
        let json = serde_json::to_value(&segment).unwrap();
        assert!(json["options"][0].get("next_segment_id").is_none());
    }

    #[test]
    fn test_view_after_early_exit_has_no_segment() {
        let scenario = bundled::market_basics().unwrap();
        let traversal = Traversal::replay(&scenario, "sw", &["sw-1-a", "sw-2-b"]).unwrap();

        let view = traversal.view(&scenario);

        assert!(view.segment.is_none());
        assert!(view.is_terminal);
        assert_eq!(view.segments_visited, 2);
        assert_eq!(view.vocabulary.len(), 2);
    }
}
