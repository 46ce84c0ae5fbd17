use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{AnsweredQuestion, OptionKey, Question, QuizKind};
use quiz_core::scoring::{ScoreReport, score};
use quiz_core::time::elapsed_secs;

use super::plan::SessionPlan;
use super::progress::SessionProgress;
use crate::error::{EmptyBankError, SessionError};

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded { correct: bool },
    /// The current question already has a binding pick.
    Ignored,
    /// The exam time ran out first; the pick was dropped and the session finished.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timer is running.
    Inactive,
    Running { remaining_secs: u64 },
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Completed,
    TimeExpired,
}

//
// ─── TIMER ─────────────────────────────────────────────────────────────────────
//

/// Wall-clock limit for a mock exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamTimer {
    started_at: DateTime<Utc>,
    limit_secs: u64,
}

impl ExamTimer {
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, limit_secs: u64) -> Self {
        Self {
            started_at,
            limit_secs,
        }
    }

    #[must_use]
    pub fn limit_secs(&self) -> u64 {
        self.limit_secs
    }

    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        self.limit_secs
            .saturating_sub(elapsed_secs(self.started_at, now))
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt.
///
/// Steps through the sampled questions in order. `answers` holds at most one
/// entry per question, in question order; once finished it holds exactly one.
pub struct QuizSession {
    kind: QuizKind,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<AnsweredQuestion>,
    timer: Option<ExamTimer>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    finish_reason: Option<FinishReason>,
}

impl QuizSession {
    /// Start a session over `questions`, optionally against a time limit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn new(
        kind: QuizKind,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
        time_limit_secs: Option<u64>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            let empty = match kind {
                QuizKind::Category(category) => EmptyBankError::Category(category),
                QuizKind::MockExam => EmptyBankError::Pool,
            };
            return Err(SessionError::Empty(empty));
        }

        Ok(Self {
            kind,
            answers: Vec::with_capacity(questions.len()),
            questions,
            current: 0,
            timer: time_limit_secs.map(|limit| ExamTimer::new(started_at, limit)),
            started_at,
            finished_at: None,
            finish_reason: None,
        })
    }

    /// Start a session from a plan. Mock exams get `time_limit_secs`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the plan has no questions.
    pub fn from_plan(
        plan: SessionPlan,
        started_at: DateTime<Utc>,
        time_limit_secs: u64,
    ) -> Result<Self, SessionError> {
        let limit = plan.kind.is_mock().then_some(time_limit_secs);
        Self::new(plan.kind, plan.questions, started_at, limit)
    }

    #[must_use]
    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the active question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            return None;
        }
        self.questions.get(self.current)
    }

    /// The binding answer for the active question, if one was picked.
    #[must_use]
    pub fn current_answer(&self) -> Option<&AnsweredQuestion> {
        if self.is_finished() {
            return None;
        }
        self.answers.get(self.current)
    }

    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        self.current_answer().is_some()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finish_reason.is_some()
    }

    /// Running exam timer; `None` for category quizzes and after finishing.
    #[must_use]
    pub fn timer(&self) -> Option<&ExamTimer> {
        self.timer.as_ref()
    }

    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> Option<u64> {
        self.timer.map(|timer| timer.remaining_secs(now))
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_questions(),
            position: (self.current + 1).min(self.total_questions()),
            answered: self.answers.iter().filter(|a| !a.is_skipped()).count(),
            is_complete: self.is_finished(),
        }
    }

    /// Record a pick for the active question. The first pick is binding.
    ///
    /// A pick made after the exam time ran out finishes the session instead.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once the session is over and
    /// `SessionError::InvalidOption` if `key` is not an option of the question.
    pub fn record_answer(
        &mut self,
        key: OptionKey,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if self.expire_if_due(now) {
            return Ok(AnswerOutcome::Expired);
        }
        let Some(question) = self.questions.get(self.current) else {
            return Err(SessionError::Finished);
        };
        if !question.has_option(&key) {
            return Err(SessionError::InvalidOption { key });
        }
        if self.answers.len() > self.current {
            return Ok(AnswerOutcome::Ignored);
        }

        let answer = AnsweredQuestion::picked(question, key);
        let correct = answer.is_correct();
        self.answers.push(answer);
        Ok(AnswerOutcome::Recorded { correct })
    }

    /// Move to the next question, finishing after the last one.
    ///
    /// An unanswered question is recorded as skipped. Past the exam time limit
    /// the session finishes with every remaining question skipped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once the session is over.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if self.expire_if_due(now) {
            return Ok(AdvanceOutcome::Finished);
        }
        if self.answers.len() <= self.current {
            let skipped = AnsweredQuestion::skipped(&self.questions[self.current]);
            self.answers.push(skipped);
        }

        self.current += 1;
        if self.current >= self.questions.len() {
            self.finish(now, FinishReason::Completed);
            return Ok(AdvanceOutcome::Finished);
        }
        Ok(AdvanceOutcome::Next)
    }

    /// Check the exam timer against `now`.
    ///
    /// When no time remains, every unanswered question is recorded as skipped
    /// and the session finishes immediately.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.is_finished() {
            return TickOutcome::Inactive;
        }
        let Some(timer) = self.timer else {
            return TickOutcome::Inactive;
        };

        if self.expire_if_due(now) {
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining_secs: timer.remaining_secs(now),
        }
    }

    /// Grade the answer record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` while the session is running.
    pub fn score(&self, passing_percent: u32) -> Result<ScoreReport, SessionError> {
        if !self.is_finished() {
            return Err(SessionError::NotFinished);
        }
        Ok(score(&self.answers, passing_percent)?)
    }

    /// Finish as timed out when the exam timer has run down.
    fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.timer {
            Some(timer) if timer.remaining_secs(now) == 0 => {}
            _ => return false,
        }

        let skipped: Vec<_> = self.questions[self.answers.len()..]
            .iter()
            .map(AnsweredQuestion::skipped)
            .collect();
        self.answers.extend(skipped);
        self.current = self.questions.len();
        self.finish(now, FinishReason::TimeExpired);
        true
    }

    fn finish(&mut self, now: DateTime<Utc>, reason: FinishReason) {
        self.timer = None;
        self.finished_at = Some(now);
        self.finish_reason = Some(reason);
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("kind", &self.kind)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("timer", &self.timer)
            .field("started_at", &self.started_at)
            .field("finish_reason", &self.finish_reason)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
