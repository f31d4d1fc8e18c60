use tracing::info;

use super::{Policy, PolicyKind};
use crate::model::{ItemId, ItemStat};

/// Round-robin retry policy.
///
/// Round one returns, in list order, the first item that is new, was last
/// missed, or has cooled down for two steps without two correct answers in a
/// row. Once a pass finds nothing, round two starts: items still missed, with
/// fewer than two answers, or not shown since round two began are swept until
/// none remain.
///
/// An item shown on the previous step is skipped unless it is the last item
/// in the list, so a single remaining item can still be repeated.
#[derive(Debug, Clone, Default)]
pub struct RoundRobin {
    second_round_start: Option<u64>,
}

impl RoundRobin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn first_match(
        step: u64,
        stats: &[ItemStat],
        wanted: impl Fn(&ItemStat) -> bool,
    ) -> Option<ItemId> {
        let last = stats.len().saturating_sub(1);
        stats
            .iter()
            .enumerate()
            .filter(|(index, stat)| *index == last || !shown_just_before(stat, step))
            .find(|(_, stat)| wanted(stat))
            .map(|(index, _)| ItemId::new(index))
    }
}

impl Policy for RoundRobin {
    fn kind(&self) -> PolicyKind {
        PolicyKind::RoundRobin
    }

    fn select(&mut self, step: u64, stats: &[ItemStat]) -> Option<ItemId> {
        let round_one = Self::first_match(step, stats, |stat| {
            stat.history().is_empty()
                || stat.last_correct() == Some(false)
                || (cooled_down(stat, step) && !stat.correct_last_two())
        });
        if round_one.is_some() {
            return round_one;
        }

        let boundary = *self.second_round_start.get_or_insert_with(|| {
            info!(step, "round-robin pass exhausted, starting second round");
            step
        });

        Self::first_match(step, stats, |stat| {
            stat.last_correct() != Some(true)
                || stat.answered() < 2
                || stat.last_shown().is_none_or(|shown| shown < boundary)
        })
    }

    fn second_round_start(&self) -> Option<u64> {
        self.second_round_start
    }
}

fn shown_just_before(stat: &ItemStat, step: u64) -> bool {
    step.checked_sub(1)
        .is_some_and(|previous| stat.last_shown() == Some(previous))
}

/// Not shown during the last two steps. Never-shown counts as cooled.
fn cooled_down(stat: &ItemStat, step: u64) -> bool {
    stat.last_shown()
        .is_none_or(|shown| shown.saturating_add(2) <= step)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
