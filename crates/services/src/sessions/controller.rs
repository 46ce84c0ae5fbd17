use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use quiz_core::model::{Category, OptionKey, QuestionBanks, QuizKind, QuizSettings};
use quiz_core::time::elapsed_secs;

use super::plan::plan_session;
use super::service::{
    AdvanceOutcome, AnswerOutcome, ExamTimer, FinishReason, QuizSession, TickOutcome,
};
use super::view::{QuizResults, ReviewEntry, quiz_results, review_entries};
use crate::error::{EmptyBankError, LoadError, SessionError};

/// The single screen the presenter should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizScreen {
    /// Banks are still loading.
    Idle,
    CategorySelection,
    InProgress,
    Finished,
    Reviewing,
    /// Nothing to ask for the chosen quiz.
    Notice(Notice),
}

/// Dismissible explanation shown instead of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub cause: EmptyBankError,
}

impl Notice {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self.cause {
            EmptyBankError::Category(_) => "No questions yet for this category.",
            EmptyBankError::Pool => "No questions available yet.",
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self.cause {
            EmptyBankError::Category(category) => {
                format!("Add questions to questions/{}, then refresh.", category.file_name())
            }
            EmptyBankError::Pool => {
                "Add questions to the JSON files in questions/, then refresh.".to_string()
            }
        }
    }
}

/// Persistent notice after a failed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub detail: String,
}

impl LoadFailure {
    pub const TITLE: &'static str = "Could not load questions.";
    pub const GUIDANCE: &'static str =
        "Check that the questions directory exists and every bank is a JSON array, then restart.";
}

#[derive(Debug, Clone)]
enum LoadState {
    Pending,
    Ready(QuestionBanks),
    Failed(LoadFailure),
}

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { questions: usize },
    Notice(Notice),
}

/// Owns the quiz state machine: which screen is active and the current session.
///
/// Time enters only through the `now` arguments, so any scheduler (a UI timer
/// or a test) can drive `tick`.
#[derive(Debug)]
pub struct QuizController {
    settings: QuizSettings,
    load: LoadState,
    screen: QuizScreen,
    session: Option<QuizSession>,
}

impl QuizController {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self {
            settings,
            load: LoadState::Pending,
            screen: QuizScreen::Idle,
            session: None,
        }
    }

    /// Controller with banks already loaded, on the category screen.
    #[must_use]
    pub fn with_banks(settings: QuizSettings, banks: QuestionBanks) -> Self {
        let mut controller = Self::new(settings);
        controller.load_finished(Ok(banks));
        controller
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn screen(&self) -> &QuizScreen {
        &self.screen
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn banks(&self) -> Option<&QuestionBanks> {
        match &self.load {
            LoadState::Ready(banks) => Some(banks),
            LoadState::Pending | LoadState::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn load_failure(&self) -> Option<&LoadFailure> {
        match &self.load {
            LoadState::Failed(failure) => Some(failure),
            LoadState::Pending | LoadState::Ready(_) => None,
        }
    }

    /// Whether category and mock-exam buttons accept clicks.
    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        matches!(self.load, LoadState::Ready(_))
    }

    /// True while a mock exam is running and needs ticks.
    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.screen == QuizScreen::InProgress
            && self.session.as_ref().is_some_and(|s| s.timer().is_some())
    }

    /// Settle the startup load. Only the first call has an effect.
    pub fn load_finished(&mut self, result: Result<QuestionBanks, LoadError>) {
        if !matches!(self.load, LoadState::Pending) {
            debug!("ignoring repeated load result");
            return;
        }
        self.load = match result {
            Ok(banks) => LoadState::Ready(banks),
            Err(err) => {
                warn!(error = %err, "quiz controls disabled after load failure");
                LoadState::Failed(LoadFailure {
                    detail: err.to_string(),
                })
            }
        };
        self.screen = QuizScreen::CategorySelection;
    }

    /// Start a quiz over one category's bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotLoaded` or `SessionError::LoadFailed` when no
    /// banks are available.
    pub fn start_category_quiz<R: Rng + ?Sized>(
        &mut self,
        category: Category,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<StartOutcome, SessionError> {
        self.start(QuizKind::Category(category), now, rng)
    }

    /// Start the timed exam over every category.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotLoaded` or `SessionError::LoadFailed` when no
    /// banks are available.
    pub fn start_mock_exam<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<StartOutcome, SessionError> {
        self.start(QuizKind::MockExam, now, rng)
    }

    /// Start a fresh session of the same kind as the finished one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` unless on the results or review screen.
    pub fn retake<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<StartOutcome, SessionError> {
        if !matches!(self.screen, QuizScreen::Finished | QuizScreen::Reviewing) {
            return Err(SessionError::NotFinished);
        }
        let kind = self
            .session
            .as_ref()
            .map(QuizSession::kind)
            .ok_or(SessionError::NotStarted)?;
        self.start(kind, now, rng)
    }

    fn start<R: Rng + ?Sized>(
        &mut self,
        kind: QuizKind,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<StartOutcome, SessionError> {
        let banks = match &self.load {
            LoadState::Ready(banks) => banks,
            LoadState::Pending => return Err(SessionError::NotLoaded),
            LoadState::Failed(_) => return Err(SessionError::LoadFailed),
        };

        // Drops any running session and its timer.
        self.session = None;

        let plan = match plan_session(kind, banks, &self.settings, rng) {
            Ok(plan) => plan,
            Err(cause) => {
                info!(quiz = kind.id(), %cause, "nothing to ask");
                let notice = Notice { cause };
                self.screen = QuizScreen::Notice(notice);
                return Ok(StartOutcome::Notice(notice));
            }
        };

        let pool_size = plan.pool_size;
        let session = QuizSession::from_plan(plan, now, self.settings.mock_time_limit_secs())?;
        let questions = session.total_questions();
        info!(
            quiz = kind.id(),
            questions,
            pool = pool_size,
            time_limit_secs = session.timer().map(ExamTimer::limit_secs),
            "quiz started"
        );
        self.session = Some(session);
        self.screen = QuizScreen::InProgress;
        Ok(StartOutcome::Started { questions })
    }

    /// Record a pick for the active question. A pick after the exam time ran
    /// out moves to the results screen instead.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` outside an active quiz, or the
    /// session's own error for invalid options.
    pub fn record_answer(
        &mut self,
        key: OptionKey,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SessionError> {
        let outcome = self.active_session_mut()?.record_answer(key, now)?;
        if outcome == AnswerOutcome::Expired {
            self.on_finished();
        }
        Ok(outcome)
    }

    /// Move to the next question, or to the results screen after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` outside an active quiz.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        let outcome = self.active_session_mut()?.advance(now)?;
        if outcome == AdvanceOutcome::Finished {
            self.on_finished();
        }
        Ok(outcome)
    }

    /// Drive the exam timer. Expiry moves straight to the results screen.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let Ok(session) = self.active_session_mut() else {
            return TickOutcome::Inactive;
        };
        let outcome = session.tick(now);
        if outcome == TickOutcome::Expired {
            self.on_finished();
        }
        outcome
    }

    /// Show the per-question review.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` unless on the results screen.
    pub fn enter_review(&mut self) -> Result<(), SessionError> {
        if self.screen != QuizScreen::Finished {
            return Err(SessionError::NotFinished);
        }
        self.screen = QuizScreen::Reviewing;
        Ok(())
    }

    /// Back to the category screen, discarding any session.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            debug!("session discarded");
        }
        self.screen = match self.load {
            LoadState::Pending => QuizScreen::Idle,
            LoadState::Ready(_) | LoadState::Failed(_) => QuizScreen::CategorySelection,
        };
    }

    pub fn dismiss_notice(&mut self) {
        self.reset();
    }

    /// Results of the finished session, if any.
    #[must_use]
    pub fn results(&self) -> Option<QuizResults> {
        let session = self.session.as_ref()?;
        quiz_results(session, self.settings.passing_percent()).ok()
    }

    /// Review rows of the finished session, if any.
    #[must_use]
    pub fn review(&self) -> Option<Vec<ReviewEntry>> {
        self.session
            .as_ref()
            .and_then(|session| review_entries(session).ok())
    }

    fn active_session_mut(&mut self) -> Result<&mut QuizSession, SessionError> {
        if self.screen != QuizScreen::InProgress {
            return Err(SessionError::NotStarted);
        }
        self.session.as_mut().ok_or(SessionError::NotStarted)
    }

    fn on_finished(&mut self) {
        self.screen = QuizScreen::Finished;
        if let Some(results) = self.results() {
            let reason = match results.reason {
                FinishReason::Completed => "completed",
                FinishReason::TimeExpired => "time expired",
            };
            let duration_secs = self.session.as_ref().and_then(|session| {
                let finished_at = session.finished_at()?;
                Some(elapsed_secs(session.started_at(), finished_at))
            });
            info!(
                correct = results.report.correct,
                total = results.report.total,
                percent = results.report.percent,
                passed = results.report.passed,
                reason,
                duration_secs,
                "quiz finished"
            );
        }
    }
}
