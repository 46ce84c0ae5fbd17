//! Grading of a session's answer record.

use thiserror::Error;

use crate::model::AnsweredQuestion;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("no answers to score")]
    NoData,
}

/// Outcome of grading a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct: usize,
    pub answered: usize,
    pub skipped: usize,
    pub total: usize,
    pub percent: u32,
    pub passed: bool,
}

/// Grade an ordered answer record.
///
/// Skipped answers count as incorrect. `percent` is rounded half up, and the
/// session passes when `percent >= passing_percent`.
///
/// # Errors
///
/// Returns `ScoreError::NoData` when `answers` is empty.
pub fn score(
    answers: &[AnsweredQuestion],
    passing_percent: u32,
) -> Result<ScoreReport, ScoreError> {
    let total = answers.len();
    if total == 0 {
        return Err(ScoreError::NoData);
    }

    let correct = answers.iter().filter(|a| a.is_correct()).count();
    let skipped = answers.iter().filter(|a| a.is_skipped()).count();
    let percent = rounded_percent(correct, total);

    Ok(ScoreReport {
        correct,
        answered: total - skipped,
        skipped,
        total,
        percent,
        passed: percent >= passing_percent,
    })
}

fn rounded_percent(correct: usize, total: usize) -> u32 {
    let correct = correct as u64;
    let total = total as u64;
    let percent = (200 * correct + total) / (2 * total);
    u32::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionKey;

    fn answer(picked: Option<&str>, correct: &str) -> AnsweredQuestion {
        AnsweredQuestion {
            picked: picked.map(OptionKey::from),
            correct: OptionKey::from(correct),
            explanation: String::new(),
        }
    }

    fn record(correct: usize, wrong: usize, skipped: usize) -> Vec<AnsweredQuestion> {
        let mut answers = Vec::new();
        answers.extend((0..correct).map(|_| answer(Some("A"), "A")));
        answers.extend((0..wrong).map(|_| answer(Some("B"), "A")));
        answers.extend((0..skipped).map(|_| answer(None, "A")));
        answers
    }

    #[test]
    fn seven_of_ten_passes_at_seventy() {
        let report = score(&record(7, 3, 0), 70).unwrap();
        assert_eq!(report.correct, 7);
        assert_eq!(report.percent, 70);
        assert!(report.passed);
    }

    #[test]
    fn zero_of_ten_fails() {
        let report = score(&record(0, 10, 0), 70).unwrap();
        assert_eq!(report.percent, 0);
        assert!(!report.passed);
    }

    #[test]
    fn skipped_answers_count_as_incorrect() {
        let report = score(&record(2, 0, 23), 70).unwrap();
        assert_eq!(report.total, 25);
        assert_eq!(report.answered, 2);
        assert_eq!(report.skipped, 23);
        assert_eq!(report.percent, 8);
        assert!(!report.passed);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(score(&record(1, 7, 0), 70).unwrap().percent, 13);
        assert_eq!(score(&record(2, 1, 0), 70).unwrap().percent, 67);
        assert_eq!(score(&record(3, 0, 0), 70).unwrap().percent, 100);
    }

    #[test]
    fn empty_record_is_no_data() {
        assert_eq!(score(&[], 70), Err(ScoreError::NoData));
    }
}
