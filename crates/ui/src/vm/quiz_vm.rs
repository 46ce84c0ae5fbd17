use quiz_core::Clock;
use quiz_core::model::{Category, OptionKey, QuestionBanks, QuizSettings};
use rand::Rng;
use services::{LoadError, QuizController, QuizScreen, SessionError, TickOutcome};
use tracing::{debug, warn};

use super::screen_vm::{ScreenVm, map_screen};
use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    StartCategory(Category),
    StartMock,
    Pick(OptionKey),
    Advance,
    Review,
    Retake,
    BackToCategories,
}

/// Keys the quiz screen reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Enter,
    Escape,
    Char(String),
}

/// Presenter state: the controller plus the clock that feeds it.
pub struct QuizVm {
    controller: QuizController,
    clock: Clock,
    last_error: Option<ViewError>,
}

impl QuizVm {
    #[must_use]
    pub fn new(settings: QuizSettings, clock: Clock) -> Self {
        Self {
            controller: QuizController::new(settings),
            clock,
            last_error: None,
        }
    }

    #[must_use]
    pub fn with_banks(settings: QuizSettings, banks: QuestionBanks, clock: Clock) -> Self {
        Self {
            controller: QuizController::with_banks(settings, banks),
            clock,
            last_error: None,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &QuizController {
        &self.controller
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Lets tests move a fixed clock between ticks.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn last_error(&self) -> Option<ViewError> {
        self.last_error
    }

    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.controller.timer_active()
    }

    pub fn load_finished(&mut self, result: Result<QuestionBanks, LoadError>) {
        self.controller.load_finished(result);
    }

    /// Apply a user intent. Rejected intents are logged and kept as `last_error`.
    pub fn dispatch<R: Rng + ?Sized>(&mut self, intent: QuizIntent, rng: &mut R) {
        let now = self.clock.now();
        let result: Result<(), SessionError> = match &intent {
            QuizIntent::StartCategory(category) => self
                .controller
                .start_category_quiz(*category, now, rng)
                .map(drop),
            QuizIntent::StartMock => self.controller.start_mock_exam(now, rng).map(drop),
            QuizIntent::Pick(key) => self.controller.record_answer(key.clone(), now).map(drop),
            QuizIntent::Advance => self.controller.advance(now).map(drop),
            QuizIntent::Review => self.controller.enter_review(),
            QuizIntent::Retake => self.controller.retake(now, rng).map(drop),
            QuizIntent::BackToCategories => {
                if matches!(self.controller.screen(), QuizScreen::Notice(_)) {
                    self.controller.dismiss_notice();
                } else {
                    self.controller.reset();
                }
                Ok(())
            }
        };

        match result {
            Ok(()) => {
                debug!(?intent, "intent applied");
                self.last_error = None;
            }
            Err(err) => {
                warn!(?intent, error = %err, "intent rejected");
                self.last_error = Some(ViewError::from(&err));
            }
        }
    }

    /// Drive the exam timer from the clock.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.controller.tick(self.clock.now());
        if outcome == TickOutcome::Expired {
            debug!("exam timer expired");
        }
        outcome
    }

    #[must_use]
    pub fn screen(&self) -> ScreenVm {
        map_screen(&self.controller, self.clock.now())
    }

    /// Intent for a key press on the current screen, if any.
    ///
    /// Letters pick an option of an unanswered question, Enter advances once a
    /// pick is made, and Escape leaves any screen but the category picker.
    #[must_use]
    pub fn key_intent(&self, key: &KeyPress) -> Option<QuizIntent> {
        let screen = self.controller.screen();
        match key {
            KeyPress::Escape => (!matches!(
                screen,
                QuizScreen::Idle | QuizScreen::CategorySelection
            ))
            .then_some(QuizIntent::BackToCategories),
            KeyPress::Enter => {
                let session = self.controller.session()?;
                (*screen == QuizScreen::InProgress && session.is_current_answered())
                    .then_some(QuizIntent::Advance)
            }
            KeyPress::Char(value) => {
                if *screen != QuizScreen::InProgress {
                    return None;
                }
                let session = self.controller.session()?;
                if session.is_current_answered() {
                    return None;
                }
                session
                    .current_question()?
                    .options()
                    .map(|(option, _)| option)
                    .find(|option| option.as_str().eq_ignore_ascii_case(value))
                    .map(|option| QuizIntent::Pick(option.clone()))
            }
        }
    }
}
