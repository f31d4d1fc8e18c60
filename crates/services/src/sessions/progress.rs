use serde::Serialize;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub total_items: usize,
    pub items_seen: usize,
    pub answered: usize,
    pub correct: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.answered.saturating_sub(self.correct)
    }
}
