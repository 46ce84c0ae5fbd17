use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::QuizSettings;
use services::QuestionBankService;

pub trait UiApp: Send + Sync {
    fn question_banks(&self) -> Arc<QuestionBankService>;
    fn quiz_settings(&self) -> QuizSettings;
    fn clock(&self) -> Clock;
}

#[derive(Clone)]
pub struct AppContext {
    question_banks: Arc<QuestionBankService>,
    quiz_settings: QuizSettings,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            question_banks: app.question_banks(),
            quiz_settings: app.quiz_settings(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn question_banks(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_banks)
    }

    #[must_use]
    pub fn quiz_settings(&self) -> QuizSettings {
        self.quiz_settings
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
