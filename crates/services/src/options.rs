use serde::{Deserialize, Serialize};

use drill_core::distractor::DEFAULT_CHOICE_COUNT;
use drill_core::model::{Reorder, Segment};
use drill_core::scheduler::PolicyKind;
use drill_core::settings::{SchedulerSettings, SettingsError};

/// Per-session choices made before the first question is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizOptions {
    pub policy: PolicyKind,
    pub scheduler: SchedulerSettings,
    /// Offer multiple choice instead of free-text entry when possible.
    pub provide_choices: bool,
    /// Wrong answers to aim for per question.
    pub choice_count: usize,
    /// Ask with the second column and expect the first.
    pub from_english: bool,
    pub segment: Segment,
    pub reorder: Reorder,
}

impl QuizOptions {
    #[must_use]
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_choices(mut self, choice_count: usize) -> Self {
        self.provide_choices = true;
        self.choice_count = choice_count;
        self
    }

    #[must_use]
    pub fn with_from_english(mut self, from_english: bool) -> Self {
        self.from_english = from_english;
        self
    }

    #[must_use]
    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = segment;
        self
    }

    #[must_use]
    pub fn with_reorder(mut self, reorder: Reorder) -> Self {
        self.reorder = reorder;
        self
    }

    /// # Errors
    ///
    /// Returns `SettingsError` for invalid scheduler settings or a zero choice
    /// count while choices are enabled.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.scheduler.validate()?;
        if self.provide_choices && self.choice_count == 0 {
            return Err(SettingsError::InvalidChoiceCount);
        }
        Ok(())
    }
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            scheduler: SchedulerSettings::default(),
            provide_choices: false,
            choice_count: DEFAULT_CHOICE_COUNT,
            from_english: false,
            segment: Segment::All,
            reorder: Reorder::None,
        }
    }
}
