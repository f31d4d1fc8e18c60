use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default trailing-correct streak above which an item is retired.
pub const DEFAULT_RETIRE_AFTER_STREAK: u32 = 4;

/// Default streak the newest windowed item needs before the next one is introduced.
pub const DEFAULT_INTRODUCE_AFTER_STREAK: u32 = 1;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("introduce-after streak ({introduce}) must be <= retire-after streak + 1 ({limit})")]
    IntroduceAfterRetirement { introduce: u32, limit: u32 },

    #[error("segment range {start}..{end} is reversed")]
    InvalidSegment { start: usize, end: usize },

    #[error("cannot parse segment {0:?}; expected `all` or `start-end[,start-end...]`")]
    UnparsableSegment(String),

    #[error("unknown reorder mode {0:?}; expected none, shuffle, local or local:<n>")]
    UnknownReorder(String),

    #[error("unknown policy {0:?}")]
    UnknownPolicy(String),

    #[error("choice count must be > 0")]
    InvalidChoiceCount,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tuning knobs shared by the scheduling policies.
///
/// Only the adaptive policy reads these today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    retire_after_streak: u32,
    introduce_after_streak: u32,
}

impl SchedulerSettings {
    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::IntroduceAfterRetirement` when the introduction
    /// threshold can never be reached by a non-retired item.
    pub fn new(retire_after_streak: u32, introduce_after_streak: u32) -> Result<Self, SettingsError> {
        let settings = Self {
            retire_after_streak,
            introduce_after_streak,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Re-checks invariants, e.g. after deserializing.
    ///
    /// # Errors
    ///
    /// See [`SchedulerSettings::new`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        let limit = self.retire_after_streak.saturating_add(1);
        if self.introduce_after_streak > limit {
            return Err(SettingsError::IntroduceAfterRetirement {
                introduce: self.introduce_after_streak,
                limit,
            });
        }
        Ok(())
    }

    /// Items whose streak exceeds this are considered mastered.
    #[must_use]
    pub fn retire_after_streak(&self) -> u32 {
        self.retire_after_streak
    }

    #[must_use]
    pub fn introduce_after_streak(&self) -> u32 {
        self.introduce_after_streak
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            retire_after_streak: DEFAULT_RETIRE_AFTER_STREAK,
            introduce_after_streak: DEFAULT_INTRODUCE_AFTER_STREAK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = SchedulerSettings::default();
        assert_eq!(settings.retire_after_streak(), 4);
        assert_eq!(settings.introduce_after_streak(), 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn introduce_threshold_may_equal_retirement() {
        assert!(SchedulerSettings::new(4, 5).is_ok());
        assert!(matches!(
            SchedulerSettings::new(4, 6),
            Err(SettingsError::IntroduceAfterRetirement {
                introduce: 6,
                limit: 5
            })
        ));
    }
}
