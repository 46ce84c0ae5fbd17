mod controller;
mod plan;
mod progress;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{LoadFailure, Notice, QuizController, QuizScreen, StartOutcome};
pub use plan::{SessionPlan, plan_session, sample_questions};
pub use progress::SessionProgress;
pub use service::{
    AdvanceOutcome, AnswerOutcome, ExamTimer, FinishReason, QuizSession, TickOutcome,
};
pub use view::{QuizResults, ReviewEntry, quiz_results, review_entries};
