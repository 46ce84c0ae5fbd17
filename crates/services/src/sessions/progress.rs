/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    /// One-based position of the active question.
    pub position: usize,
    /// Questions with a pick (skips excluded).
    pub answered: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of the quiz reached, as a percentage for progress bars.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 * 100.0 / self.total as f64
    }
}
