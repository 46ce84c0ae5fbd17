use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("category quiz size must be > 0")]
    InvalidCategoryQuizSize,

    #[error("mock exam size must be > 0")]
    InvalidMockExamSize,

    #[error("mock exam time limit must be > 0 seconds")]
    InvalidTimeLimit,

    #[error("passing percent must be between 1 and 100, got {0}")]
    InvalidPassingPercent(u32),
}

/// Sizes, time limit and pass mark for quizzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    category_quiz_size: usize,
    mock_exam_size: usize,
    mock_time_limit_secs: u64,
    passing_percent: u32,
}

impl QuizSettings {
    pub const DEFAULT_QUIZ_SIZE: usize = 25;
    pub const DEFAULT_MOCK_SIZE: usize = 25;
    pub const DEFAULT_TIME_LIMIT_SECS: u64 = 60 * 60;
    pub const DEFAULT_PASSING_PERCENT: u32 = 70;

    /// # Errors
    ///
    /// Returns `SettingsError` if a size or the time limit is zero, or the
    /// passing percent is outside `1..=100`.
    pub fn new(
        category_quiz_size: usize,
        mock_exam_size: usize,
        mock_time_limit_secs: u64,
        passing_percent: u32,
    ) -> Result<Self, SettingsError> {
        if category_quiz_size == 0 {
            return Err(SettingsError::InvalidCategoryQuizSize);
        }
        if mock_exam_size == 0 {
            return Err(SettingsError::InvalidMockExamSize);
        }
        if mock_time_limit_secs == 0 {
            return Err(SettingsError::InvalidTimeLimit);
        }
        if !(1..=100).contains(&passing_percent) {
            return Err(SettingsError::InvalidPassingPercent(passing_percent));
        }

        Ok(Self {
            category_quiz_size,
            mock_exam_size,
            mock_time_limit_secs,
            passing_percent,
        })
    }

    #[must_use]
    pub fn category_quiz_size(&self) -> usize {
        self.category_quiz_size
    }

    #[must_use]
    pub fn mock_exam_size(&self) -> usize {
        self.mock_exam_size
    }

    #[must_use]
    pub fn mock_time_limit_secs(&self) -> u64 {
        self.mock_time_limit_secs
    }

    #[must_use]
    pub fn passing_percent(&self) -> u32 {
        self.passing_percent
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            category_quiz_size: Self::DEFAULT_QUIZ_SIZE,
            mock_exam_size: Self::DEFAULT_MOCK_SIZE,
            mock_time_limit_secs: Self::DEFAULT_TIME_LIMIT_SECS,
            passing_percent: Self::DEFAULT_PASSING_PERCENT,
        }
    }
}
