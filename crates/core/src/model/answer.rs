use crate::model::{OptionKey, Question};

/// The record of one question within a finished or running session.
///
/// `picked` is `None` when the question was skipped, either by advancing
/// without a pick or because the exam timer ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub picked: Option<OptionKey>,
    pub correct: OptionKey,
    pub explanation: String,
}

impl AnsweredQuestion {
    #[must_use]
    pub fn picked(question: &Question, key: OptionKey) -> Self {
        Self {
            picked: Some(key),
            correct: question.correct().clone(),
            explanation: question.explanation().to_string(),
        }
    }

    #[must_use]
    pub fn skipped(question: &Question) -> Self {
        Self {
            picked: None,
            correct: question.correct().clone(),
            explanation: question.explanation().to_string(),
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.picked.as_ref() == Some(&self.correct)
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.picked.is_none()
    }
}
