use services::SessionError;

/// User-facing failure of a quiz action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotReady,
    LoadFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NotReady => "Questions are still loading. Please wait a moment.",
            ViewError::LoadFailed => {
                "Quizzes are unavailable because the questions could not be loaded."
            }
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::NotLoaded => ViewError::NotReady,
            SessionError::LoadFailed => ViewError::LoadFailed,
            _ => ViewError::Unknown,
        }
    }
}
