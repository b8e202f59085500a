//! The traversal state machine.
//!
//! A [`Traversal`] is an immutable value. [`Traversal::advance`] never
//! mutates `self`; on success it returns a fresh value, on failure the caller
//! still holds the old one and may retry.

use lingua_content::{LanguageGraph, NextStep, SegmentNode, ValidatedScenario};
use lingua_core::vocabulary::VocabularyWord;
use tracing::debug;

use crate::error::DialogueError;

/// Where a traversal currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// At the segment with this index of the language graph.
    Segment(usize),
    /// Past the last segment, reached through an option without a next
    /// segment.
    Complete,
}

/// One learner's progress through one language variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    scenario_id: String,
    language_code: String,
    position: Position,
    terminal: bool,
    vocabulary: Vec<VocabularyWord>,
    score: u32,
    visited: Vec<usize>,
    choices: Vec<String>,
    invalid_attempts: u32,
}

/// Result of a successful [`Traversal::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The state after the choice.
    pub traversal: Traversal,
    /// The in-character reply to the chosen option.
    pub response: String,
}

impl Traversal {
    /// Starts at the entry segment of the requested language variant.
    ///
    /// # Errors
    ///
    /// Returns `DialogueError::UnknownLanguageVariant` if the scenario has no
    /// such variant.
    pub fn start(scenario: &ValidatedScenario, language_code: &str) -> Result<Self, DialogueError> {
        let graph = language_graph(scenario, language_code)?;
        let entry = graph.entry();

        let (position, terminal, visited) = match graph.node(entry) {
            Some(node) => (Position::Segment(entry), node.is_endpoint(), vec![entry]),
            None => (Position::Complete, true, Vec::new()),
        };

        debug!(
            scenario_id = scenario.id(),
            language_code, terminal, "traversal started"
        );

        Ok(Self {
            scenario_id: scenario.id().to_owned(),
            language_code: language_code.to_owned(),
            position,
            terminal,
            vocabulary: Vec::new(),
            score: 0,
            visited,
            choices: Vec::new(),
            invalid_attempts: 0,
        })
    }

    /// Rebuilds a traversal by replaying a choice history from the entry
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns the first error any of the choices produces.
    pub fn replay<S: AsRef<str>>(
        scenario: &ValidatedScenario,
        language_code: &str,
        choices: &[S],
    ) -> Result<Self, DialogueError> {
        choices
            .iter()
            .try_fold(Self::start(scenario, language_code)?, |traversal, choice| {
                traversal
                    .advance(scenario, choice.as_ref())
                    .map(|step| step.traversal)
            })
    }

    /// Chooses an option of the current segment.
    ///
    /// # Errors
    ///
    /// - `AlreadyComplete` if the traversal is in a terminal state, whatever
    ///   the option id.
    /// - `InvalidChoice` if the current segment has no option `option_id`.
    /// - `ScenarioMismatch` / `UnknownLanguageVariant` if `scenario` is not
    ///   the one this traversal started on.
    pub fn advance(
        &self,
        scenario: &ValidatedScenario,
        option_id: &str,
    ) -> Result<Step, DialogueError> {
        if self.terminal {
            return Err(self.already_complete());
        }
        let graph = self.graph(scenario)?;
        let node = self
            .current_node(graph)
            .ok_or_else(|| self.already_complete())?;

        let (option, next) = node.choice(option_id).ok_or_else(|| DialogueError::InvalidChoice {
            segment_id: node.id().to_owned(),
            option_id: option_id.to_owned(),
        })?;

        let mut traversal = self.clone();
        traversal
            .vocabulary
            .extend(option.vocabulary_words.iter().cloned());
        traversal.score = traversal.score.saturating_add(option.score());
        traversal.choices.push(option.id.clone());

        let entered = match next {
            NextStep::Segment(index) => graph.node(index).map(|node| (index, node)),
            NextStep::Complete => None,
        };
        match entered {
            Some((index, node)) => {
                traversal.position = Position::Segment(index);
                traversal.terminal = node.is_endpoint();
                traversal.visited.push(index);
            }
            None => {
                traversal.position = Position::Complete;
                traversal.terminal = true;
            }
        }

        debug!(
            scenario_id = %self.scenario_id,
            language_code = %self.language_code,
            from = node.id(),
            option_id,
            terminal = traversal.terminal,
            "traversal advanced"
        );

        Ok(Step {
            traversal,
            response: option.response.clone(),
        })
    }

    /// Returns a copy with one more rejected attempt counted. Hosts call this
    /// after an `InvalidChoice` when their XP policy rewards clean runs.
    #[must_use]
    pub fn with_invalid_attempt(&self) -> Self {
        Self {
            invalid_attempts: self.invalid_attempts.saturating_add(1),
            ..self.clone()
        }
    }

    /// Returns a copy with the rejected-attempt counter set, e.g. when a
    /// stateless client reports it alongside its choice history.
    #[must_use]
    pub fn with_invalid_attempts(&self, invalid_attempts: u32) -> Self {
        Self {
            invalid_attempts,
            ..self.clone()
        }
    }

    /// The segment the learner is at, or `None` in the complete pseudo-state.
    #[must_use]
    pub fn current_segment<'a>(&self, scenario: &'a ValidatedScenario) -> Option<&'a SegmentNode> {
        let graph = self.graph(scenario).ok()?;
        self.current_node(graph)
    }

    /// The scenario this traversal runs through.
    #[must_use]
    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    /// The language variant this traversal runs through.
    #[must_use]
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// `true` at an endpoint segment or in the complete pseudo-state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Vocabulary of every chosen option, in encounter order, with repeats.
    #[must_use]
    pub fn vocabulary(&self) -> &[VocabularyWord] {
        &self.vocabulary
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Option ids chosen so far.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Number of segments entered, counting revisits.
    #[must_use]
    pub fn segments_visited(&self) -> usize {
        self.visited.len()
    }

    /// Rejected attempts recorded by the host.
    #[must_use]
    pub fn invalid_attempts(&self) -> u32 {
        self.invalid_attempts
    }

    fn graph<'a>(
        &self,
        scenario: &'a ValidatedScenario,
    ) -> Result<&'a LanguageGraph, DialogueError> {
        if scenario.id() != self.scenario_id {
            return Err(DialogueError::ScenarioMismatch {
                expected: self.scenario_id.clone(),
                actual: scenario.id().to_owned(),
            });
        }
        language_graph(scenario, &self.language_code)
    }

    fn current_node<'a>(&self, graph: &'a LanguageGraph) -> Option<&'a SegmentNode> {
        match self.position {
            Position::Segment(index) => graph.node(index),
            Position::Complete => None,
        }
    }

    fn already_complete(&self) -> DialogueError {
        DialogueError::AlreadyComplete {
            scenario_id: self.scenario_id.clone(),
            language_code: self.language_code.clone(),
        }
    }
}

fn language_graph<'a>(
    scenario: &'a ValidatedScenario,
    language_code: &str,
) -> Result<&'a LanguageGraph, DialogueError> {
    scenario
        .language(language_code)
        .ok_or_else(|| DialogueError::UnknownLanguageVariant {
            scenario_id: scenario.id().to_owned(),
            language_code: language_code.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use lingua_content::{ContentFormat, ValidationOptions, bundled, load_scenario};

    use super::*;

    fn market() -> ValidatedScenario {
        bundled::market_basics().unwrap()
    }

    fn segment_id(traversal: &Traversal, scenario: &ValidatedScenario) -> Option<String> {
        traversal
            .current_segment(scenario)
            .map(|node| node.id().to_owned())
    }

    #[test]
    fn test_swahili_market_walkthrough() {
        // Arrange
        let scenario = market();
        let initial = Traversal::start(&scenario, "sw").unwrap();
        assert_eq!(segment_id(&initial, &scenario).as_deref(), Some("sw-1"));
        assert!(!initial.is_terminal());

        // Act
        let first = initial.advance(&scenario, "sw-1-a").unwrap();
        let second = first.traversal.advance(&scenario, "sw-2-a").unwrap();
        let third = second.traversal.advance(&scenario, "anything");

        // Assert
        assert_eq!(
            segment_id(&first.traversal, &scenario).as_deref(),
            Some("sw-2")
        );
        assert_eq!(
            first.traversal.vocabulary(),
            &[VocabularyWord::new("machungwa", "oranges")]
        );
        assert_eq!(first.response, "Sawa! Machungwa ni matamu leo.");
        assert!(!first.traversal.is_terminal());

        assert_eq!(
            segment_id(&second.traversal, &scenario).as_deref(),
            Some("sw-3")
        );
        assert!(second.traversal.is_terminal());
        assert_eq!(second.traversal.position(), Position::Segment(2));

        assert!(matches!(
            third,
            Err(DialogueError::AlreadyComplete { .. })
        ));
    }

    #[test]
    fn test_advance_is_pure() {
        // Arrange
        let scenario = market();
        let initial = Traversal::start(&scenario, "sw").unwrap();
        let snapshot = initial.clone();

        // Act
        let first = initial.advance(&scenario, "sw-1-a");
        let second = initial.advance(&scenario, "sw-1-a");

        // Assert
        assert_eq!(first, second);
        assert_eq!(initial, snapshot);
    }

    #[test]
    fn test_invalid_choice_leaves_state_usable() {
        // Arrange
        let scenario = market();
        let initial = Traversal::start(&scenario, "sw").unwrap();

        // Act
        let rejected = initial.advance(&scenario, "sw-2-a");
        let retried = initial.advance(&scenario, "sw-1-a");

        // Assert
        assert_eq!(
            rejected,
            Err(DialogueError::InvalidChoice {
                segment_id: "sw-1".to_owned(),
                option_id: "sw-2-a".to_owned(),
            })
        );
        assert!(retried.is_ok());
    }

    #[test]
    fn test_terminal_state_rejects_every_option() {
        let scenario = market();
        let done = Traversal::replay(&scenario, "sw", &["sw-1-a", "sw-2-a"]).unwrap();

        for option_id in ["sw-1-a", "sw-2-a", "sw-3-a", ""] {
            assert!(matches!(
                done.advance(&scenario, option_id),
                Err(DialogueError::AlreadyComplete { .. })
            ));
        }
    }

    #[test]
    fn test_option_without_next_segment_reaches_complete_pseudo_state() {
        // Arrange
        let scenario = market();
        let at_second = Traversal::replay(&scenario, "sw", &["sw-1-a"]).unwrap();

        // Act
        let step = at_second.advance(&scenario, "sw-2-b").unwrap();

        // Assert
        assert_eq!(step.traversal.position(), Position::Complete);
        assert!(step.traversal.is_terminal());
        assert!(step.traversal.current_segment(&scenario).is_none());
        assert_eq!(step.traversal.segments_visited(), 2);
        assert_eq!(step.response, "Kwaheri! Karibu tena.");
        assert!(matches!(
            step.traversal.advance(&scenario, "sw-2-b"),
            Err(DialogueError::AlreadyComplete { .. })
        ));
    }

    #[test]
    fn test_unknown_language_is_reported() {
        let scenario = market();

        let result = Traversal::start(&scenario, "de");

        assert_eq!(
            result,
            Err(DialogueError::UnknownLanguageVariant {
                scenario_id: "market-basics-001".to_owned(),
                language_code: "de".to_owned(),
            })
        );
    }

    #[test]
    fn test_advancing_against_another_scenario_is_rejected() {
        let market = market();
        let greetings = bundled::greetings().unwrap();
        let traversal = Traversal::start(&market, "sw").unwrap();

        let result = traversal.advance(&greetings, "sw-1-a");

        assert!(matches!(result, Err(DialogueError::ScenarioMismatch { .. })));
    }

    #[test]
    fn test_replay_matches_step_by_step_advance() {
        let scenario = market();
        let stepped = Traversal::start(&scenario, "fr")
            .unwrap()
            .advance(&scenario, "fr-1-a")
            .unwrap()
            .traversal;

        let replayed = Traversal::replay(&scenario, "fr", &["fr-1-a"]).unwrap();

        assert_eq!(stepped, replayed);
        assert_eq!(replayed.choices(), &["fr-1-a".to_owned()]);
    }

    #[test]
    fn test_replay_stops_at_first_bad_choice() {
        let scenario = market();

        let result = Traversal::replay(&scenario, "sw", &["sw-1-a", "sw-9-z", "sw-2-a"]);

        assert!(matches!(result, Err(DialogueError::InvalidChoice { .. })));
    }

    #[test]
    fn test_first_option_walk_terminates_on_shipped_content() {
        for scenario in [market(), bundled::greetings().unwrap()] {
            for graph in scenario.languages() {
                // Arrange
                let mut traversal = Traversal::start(&scenario, graph.code()).unwrap();
                let mut steps = 0;

                // Act
                while !traversal.is_terminal() {
                    let first_option = traversal
                        .current_segment(&scenario)
                        .and_then(|node| node.choices().next())
                        .map(|(option, _)| option.id.clone())
                        .unwrap();
                    traversal = traversal.advance(&scenario, &first_option).unwrap().traversal;
                    steps += 1;
                    assert!(steps <= graph.len(), "{} did not terminate", graph.code());
                }

                // Assert
                assert!(traversal.is_terminal());
            }
        }
    }

    #[test]
    fn test_every_reachable_segment_exists_in_the_variant() {
        let scenario = market();
        for graph in scenario.languages() {
            for node in graph.nodes() {
                for (_, next) in node.choices() {
                    if let NextStep::Segment(index) = next {
                        assert!(graph.node(index).is_some());
                    }
                }
            }
        }
    }

    #[test]
    fn test_score_uses_option_points_with_unit_default() {
        let scenario = bundled::greetings().unwrap();

        let rich = Traversal::replay(&scenario, "sw", &["sw-1-a", "sw-2-a"]).unwrap();
        let plain = Traversal::replay(&scenario, "sw", &["sw-1-b", "sw-2-a"]).unwrap();

        assert_eq!(rich.score(), 3);
        assert_eq!(plain.score(), 2);
    }

    #[test]
    fn test_loop_back_conversation_counts_revisits() {
        // Arrange
        let text = r#"{
            "id": "loop-001", "title": "Loop", "description": "", "imageUrl": "",
            "languages": [{ "code": "sw", "name": "Swahili", "segments": [
                { "id": "ask", "character": { "id": "c", "name": "C", "avatarUrl": "" },
                  "text": "Tena?", "translation": "Again?",
                  "options": [
                    { "id": "again", "text": "Ndiyo", "response": "Sawa",
                      "nextSegmentId": "ask",
                      "vocabularyWords": [{ "word": "ndiyo", "translation": "yes" }] },
                    { "id": "stop", "text": "Hapana", "response": "Kwaheri",
                      "nextSegmentId": null }
                  ] }
            ] }]
        }"#;
        let scenario =
            load_scenario("loop.json", text, ContentFormat::Json, &ValidationOptions::default())
                .unwrap();

        // Act
        let traversal =
            Traversal::replay(&scenario, "sw", &["again", "again", "stop"]).unwrap();

        // Assert
        assert!(traversal.is_terminal());
        assert_eq!(traversal.segments_visited(), 3);
        assert_eq!(traversal.vocabulary().len(), 2);
        assert_eq!(traversal.score(), 3);
    }

    #[test]
    fn test_invalid_attempts_are_counted_on_a_copy() {
        let scenario = market();
        let traversal = Traversal::start(&scenario, "sw").unwrap();

        let bumped = traversal.with_invalid_attempt().with_invalid_attempt();

        assert_eq!(traversal.invalid_attempts(), 0);
        assert_eq!(bumped.invalid_attempts(), 2);
        assert_eq!(traversal.with_invalid_attempts(5).invalid_attempts(), 5);
    }
}
