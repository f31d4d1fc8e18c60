use serde::{Deserialize, Serialize};

/// Per-item answer history and presentation bookkeeping.
///
/// Owned by the scheduler. `history` is append-only and always has exactly
/// `right + wrong` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStat {
    history: Vec<bool>,
    right: u32,
    wrong: u32,
    last_shown: Option<u64>,
}

impl ItemStat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one graded answer.
    pub fn record(&mut self, correct: bool) {
        self.history.push(correct);
        if correct {
            self.right += 1;
        } else {
            self.wrong += 1;
        }
    }

    pub(crate) fn mark_shown(&mut self, step: u64) {
        self.last_shown = Some(step);
    }

    #[must_use]
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    #[must_use]
    pub fn right(&self) -> u32 {
        self.right
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    /// Step at which the scheduler last returned this item.
    #[must_use]
    pub fn last_shown(&self) -> Option<u64> {
        self.last_shown
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.history.len()
    }

    /// Outcome of the most recent answer, if any.
    #[must_use]
    pub fn last_correct(&self) -> Option<bool> {
        self.history.last().copied()
    }

    /// True when the last two recorded answers (or the only one) were correct.
    ///
    /// An item with no history has nothing wrong on record and also reports
    /// true; callers check for novelty first.
    #[must_use]
    pub fn correct_last_two(&self) -> bool {
        self.history.iter().rev().take(2).all(|correct| *correct)
    }

    /// Length of the trailing run of correct answers.
    #[must_use]
    pub fn streak(&self) -> u32 {
        let run = self
            .history
            .iter()
            .rev()
            .take_while(|correct| **correct)
            .count();
        u32::try_from(run).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat_with(history: &[bool]) -> ItemStat {
        let mut stat = ItemStat::new();
        for correct in history {
            stat.record(*correct);
        }
        stat
    }

    #[test]
    fn record_keeps_counts_in_step_with_history() {
        let stat = stat_with(&[true, false, true, true]);
        assert_eq!(stat.right(), 3);
        assert_eq!(stat.wrong(), 1);
        assert_eq!(stat.answered(), (stat.right() + stat.wrong()) as usize);
    }

    #[test]
    fn streak_counts_trailing_correct_run() {
        assert_eq!(stat_with(&[]).streak(), 0);
        assert_eq!(stat_with(&[true, true, false]).streak(), 0);
        assert_eq!(stat_with(&[false, true, true]).streak(), 2);
        assert_eq!(stat_with(&[true; 6]).streak(), 6);
    }

    #[test]
    fn correct_last_two_looks_at_tail_only() {
        assert!(stat_with(&[true]).correct_last_two());
        assert!(stat_with(&[false, true, true]).correct_last_two());
        assert!(!stat_with(&[true, false]).correct_last_two());
        assert!(!stat_with(&[false, true]).correct_last_two());
    }

    #[test]
    fn last_shown_starts_absent() {
        let mut stat = ItemStat::new();
        assert_eq!(stat.last_shown(), None);
        stat.mark_shown(3);
        assert_eq!(stat.last_shown(), Some(3));
        assert_eq!(stat.last_correct(), None);
    }
}
