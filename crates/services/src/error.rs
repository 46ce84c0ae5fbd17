//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{Category, OptionKey, QuestionError};
use quiz_core::scoring::ScoreError;
use storage::repository::StorageError;

/// Errors emitted while loading question banks.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to load {location}: {source}")]
    Source {
        category: Category,
        location: String,
        #[source]
        source: StorageError,
    },
    #[error("invalid question #{index} in {location}: {source}")]
    InvalidQuestion {
        category: Category,
        location: String,
        index: usize,
        #[source]
        source: QuestionError,
    },
}

impl LoadError {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            LoadError::Source { category, .. } | LoadError::InvalidQuestion { category, .. } => {
                *category
            }
        }
    }
}

/// A quiz could not start because there was nothing to ask.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EmptyBankError {
    #[error("no questions for category {0}")]
    Category(Category),
    #[error("no questions in any category")]
    Pool,
}

/// Errors emitted by quiz sessions and the controller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("question banks have not finished loading")]
    NotLoaded,
    #[error("question banks failed to load")]
    LoadFailed,
    #[error("no quiz in progress")]
    NotStarted,
    #[error("quiz already finished")]
    Finished,
    #[error("quiz has not finished yet")]
    NotFinished,
    #[error("{key} is not an option of the current question")]
    InvalidOption { key: OptionKey },
    #[error(transparent)]
    Empty(#[from] EmptyBankError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
