//! Vocabulary annotations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A word/translation pair attached to a dialogue option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyWord {
    /// The word in the target language.
    pub word: String,
    /// Its translation in the learner's language.
    pub translation: String,
}

impl VocabularyWord {
    /// Creates a vocabulary word.
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
        }
    }
}

/// Removes repeated words, keeping the first encounter of each.
pub fn dedup_in_encounter_order<'a, I>(words: I) -> Vec<VocabularyWord>
where
    I: IntoIterator<Item = &'a VocabularyWord>,
{
    let mut seen = HashSet::new();
    words
        .into_iter()
        .filter(|word| seen.insert(*word))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_encounter_order() {
        // Arrange
        let words = vec![
            VocabularyWord::new("machungwa", "oranges"),
            VocabularyWord::new("bei", "price"),
            VocabularyWord::new("machungwa", "oranges"),
            VocabularyWord::new("asante", "thank you"),
        ];

        // Act
        let unique = dedup_in_encounter_order(&words);

        // Assert
        assert_eq!(
            unique,
            vec![
                VocabularyWord::new("machungwa", "oranges"),
                VocabularyWord::new("bei", "price"),
                VocabularyWord::new("asante", "thank you"),
            ]
        );
    }

    #[test]
    fn test_same_word_with_different_translation_is_distinct() {
        let words = vec![
            VocabularyWord::new("bei", "price"),
            VocabularyWord::new("bei", "cost"),
        ];

        assert_eq!(dedup_in_encounter_order(&words).len(), 2);
    }
}
