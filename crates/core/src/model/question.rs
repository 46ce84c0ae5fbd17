use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::ids::{OptionKey, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least one option")]
    NoOptions,

    #[error("option key cannot be empty")]
    EmptyOptionKey,

    #[error("correct answer {correct:?} is not one of the options")]
    CorrectNotAnOption { correct: String },
}

/// A validated multiple-choice question.
///
/// `correct` is always a key of `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: BTreeMap<OptionKey, String>,
    correct: OptionKey,
    explanation: String,
}

impl Question {
    /// Build a question, checking that the correct key names one of the options.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are no options,
    /// an option key is blank, or `correct` is not an option key.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: BTreeMap<OptionKey, String>,
        correct: OptionKey,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if options.keys().any(|key| key.as_str().trim().is_empty()) {
            return Err(QuestionError::EmptyOptionKey);
        }
        if !options.contains_key(&correct) {
            return Err(QuestionError::CorrectNotAnOption {
                correct: correct.as_str().to_string(),
            });
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options ordered by key.
    pub fn options(&self) -> impl Iterator<Item = (&OptionKey, &str)> {
        self.options.iter().map(|(key, text)| (key, text.as_str()))
    }

    #[must_use]
    pub fn option_text(&self, key: &OptionKey) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn has_option(&self, key: &OptionKey) -> bool {
        self.options.contains_key(key)
    }

    #[must_use]
    pub fn correct(&self) -> &OptionKey {
        &self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn options(keys: &[&str]) -> BTreeMap<OptionKey, String> {
        keys.iter()
            .map(|key| (OptionKey::from(*key), format!("option {key}")))
            .collect()
    }

    fn id() -> QuestionId {
        QuestionId::new(Category::AccessControl, 0)
    }

    #[test]
    fn accepts_correct_key_among_options() {
        let question = Question::new(
            id(),
            "Who may enter?",
            options(&["A", "B", "C", "D"]),
            OptionKey::from("C"),
            "Only badge holders.",
        )
        .unwrap();

        assert_eq!(question.correct().as_str(), "C");
        assert_eq!(question.option_text(&OptionKey::from("C")), Some("option C"));
        let keys: Vec<_> = question.options().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["A", "B", "C", "D"]);
    }

    #[test]
    fn rejects_correct_key_missing_from_options() {
        let err = Question::new(id(), "Q", options(&["A", "B"]), OptionKey::from("E"), "")
            .unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectNotAnOption {
                correct: "E".to_string()
            }
        );
    }

    #[test]
    fn rejects_blank_prompt_and_empty_options() {
        assert_eq!(
            Question::new(id(), "  ", options(&["A"]), OptionKey::from("A"), "").unwrap_err(),
            QuestionError::EmptyPrompt
        );
        assert_eq!(
            Question::new(id(), "Q", BTreeMap::new(), OptionKey::from("A"), "").unwrap_err(),
            QuestionError::NoOptions
        );
    }
}
