use chrono::{DateTime, Utc};
use serde::Serialize;

use drill_core::scheduler::PolicyKind;

use super::service::SessionId;

/// Per-item line of a session summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub question: String,
    pub right: u32,
    pub wrong: u32,
    pub streak: u32,
}

/// End-of-session report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub id: SessionId,
    pub list: String,
    pub policy: PolicyKind,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub answered: usize,
    pub correct: usize,
    pub items: Vec<ItemSummary>,
}

impl SessionSummary {
    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.answered.saturating_sub(self.correct)
    }

    /// Items answered wrong at least once, worst first.
    #[must_use]
    pub fn troublesome(&self) -> Vec<&ItemSummary> {
        let mut missed: Vec<&ItemSummary> = self.items.iter().filter(|i| i.wrong > 0).collect();
        missed.sort_by(|a, b| b.wrong.cmp(&a.wrong).then_with(|| a.question.cmp(&b.question)));
        missed
    }

    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
