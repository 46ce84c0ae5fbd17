#![forbid(unsafe_code)]

pub mod error;
pub mod question_bank_service;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::{EmptyBankError, LoadError, SessionError};
pub use question_bank_service::QuestionBankService;

pub use sessions::{
    AdvanceOutcome, AnswerOutcome, FinishReason, LoadFailure, Notice, QuizController,
    QuizResults, QuizScreen, QuizSession, ReviewEntry, SessionProgress, StartOutcome, TickOutcome,
};
