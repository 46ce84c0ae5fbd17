use quiz_core::model::{OptionKey, QuestionId};
use quiz_core::scoring::ScoreReport;

use super::service::{FinishReason, QuizSession};
use crate::error::SessionError;

/// One row of the post-quiz review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub number: usize,
    pub question_id: QuestionId,
    pub prompt: String,
    pub picked: Option<(OptionKey, String)>,
    pub correct: (OptionKey, String),
    pub is_correct: bool,
    pub explanation: String,
}

/// Results of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResults {
    pub report: ScoreReport,
    pub reason: FinishReason,
}

/// Pair every question with its recorded answer, in question order.
///
/// # Errors
///
/// Returns `SessionError::NotFinished` while the session is running.
pub fn review_entries(session: &QuizSession) -> Result<Vec<ReviewEntry>, SessionError> {
    if !session.is_finished() {
        return Err(SessionError::NotFinished);
    }

    let entries = session
        .questions()
        .iter()
        .zip(session.answers())
        .enumerate()
        .map(|(i, (question, answer))| {
            let picked = answer.picked.as_ref().map(|key| {
                let text = question.option_text(key).unwrap_or_default().to_string();
                (key.clone(), text)
            });
            let correct_text = question
                .option_text(question.correct())
                .unwrap_or_default()
                .to_string();
            ReviewEntry {
                number: i + 1,
                question_id: question.id(),
                prompt: question.prompt().to_string(),
                picked,
                correct: (question.correct().clone(), correct_text),
                is_correct: answer.is_correct(),
                explanation: answer.explanation.clone(),
            }
        })
        .collect();
    Ok(entries)
}

/// Score a finished session together with how it ended.
///
/// # Errors
///
/// Returns `SessionError::NotFinished` while the session is running.
pub fn quiz_results(
    session: &QuizSession,
    passing_percent: u32,
) -> Result<QuizResults, SessionError> {
    let report = session.score(passing_percent)?;
    let reason = session.finish_reason().ok_or(SessionError::NotFinished)?;
    Ok(QuizResults { report, reason })
}
