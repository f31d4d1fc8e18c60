use tracing::info;

use super::{Policy, PolicyKind};
use crate::model::{ItemId, ItemStat};
use crate::settings::SchedulerSettings;

/// Adaptive-delay policy.
///
/// An item's delay equals its trailing correct streak, so it becomes eligible
/// again once `step >= last_shown + streak`. Items whose streak exceeds the
/// retirement threshold are never returned.
///
/// Only a window `0..=frontier` of the list is scanned, newest first. The
/// frontier advances when the newest windowed item reaches
/// `introduce_after_streak`, or when nothing in a partial window is eligible,
/// so the window always grows to cover the whole list.
///
/// When a scan of the full window comes up empty, the second round starts and
/// the window is scanned once more under the same rule. If that also fails
/// the draw is `Done`: nothing is due at this step, though items may still be
/// unlearned and become due later.
#[derive(Debug, Clone)]
pub struct AdaptiveDelay {
    retire_after: u32,
    introduce_after: u32,
    frontier: usize,
    second_round_start: Option<u64>,
}

impl AdaptiveDelay {
    #[must_use]
    pub fn new(settings: &SchedulerSettings) -> Self {
        Self {
            retire_after: settings.retire_after_streak(),
            introduce_after: settings.introduce_after_streak(),
            frontier: 0,
            second_round_start: None,
        }
    }

    /// Index of the newest item currently in the scan window.
    #[must_use]
    pub fn frontier(&self) -> usize {
        self.frontier
    }

    fn retired(&self, stat: &ItemStat) -> bool {
        stat.streak() > self.retire_after
    }

    fn grow(&mut self, step: u64, reason: &'static str) {
        self.frontier += 1;
        info!(step, frontier = self.frontier, reason, "adaptive window grew");
    }

    fn scan(&self, step: u64, stats: &[ItemStat]) -> Option<ItemId> {
        (0..=self.frontier)
            .rev()
            .find(|&index| {
                let stat = &stats[index];
                !self.retired(stat) && step >= eligible_at(stat)
            })
            .map(ItemId::new)
    }
}

impl Policy for AdaptiveDelay {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Adaptive
    }

    fn select(&mut self, step: u64, stats: &[ItemStat]) -> Option<ItemId> {
        let last = stats.len().saturating_sub(1);
        self.frontier = self.frontier.min(last);

        while self.frontier < last && stats[self.frontier].streak() >= self.introduce_after {
            self.grow(step, "newest item learned");
        }

        loop {
            if let Some(id) = self.scan(step, stats) {
                return Some(id);
            }
            if self.frontier >= last {
                break;
            }
            self.grow(step, "window exhausted");
        }

        if self.second_round_start.is_none() {
            info!(step, "adaptive pass exhausted, starting second round");
            self.second_round_start = Some(step);
        }

        // second pass over the full window, same eligibility rule
        self.scan(step, stats)
    }

    fn second_round_start(&self) -> Option<u64> {
        self.second_round_start
    }
}

/// First step at which the item may be shown again.
fn eligible_at(stat: &ItemStat) -> u64 {
    stat.last_shown()
        .unwrap_or(0)
        .saturating_add(u64::from(stat.streak()))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::tests::{items, question};
    use crate::scheduler::{Draw, Scheduler};
    use proptest::prelude::*;

    fn scheduler_with(pairs: &[(&str, &str)], settings: SchedulerSettings) -> Scheduler {
        Scheduler::from_items(items(pairs), PolicyKind::Adaptive, &settings).unwrap()
    }

    fn scheduler(pairs: &[(&str, &str)]) -> Scheduler {
        scheduler_with(pairs, SchedulerSettings::default())
    }

    fn ask(s: &mut Scheduler) -> Option<String> {
        let draw = s.next_item();
        question(s, draw)
    }

    #[test]
    fn starts_with_first_item_only() {
        let mut s = scheduler(&[("cat", "gato"), ("dog", "perro")]);
        assert_eq!(ask(&mut s).as_deref(), Some("cat"));
        s.record_outcome("cat", false).unwrap();
        // a missed item has no delay and the window has not grown
        assert_eq!(ask(&mut s).as_deref(), Some("cat"));
    }

    #[test]
    fn learning_newest_item_introduces_the_next() {
        let mut s = scheduler(&[("cat", "gato"), ("dog", "perro"), ("bird", "pájaro")]);
        assert_eq!(ask(&mut s).as_deref(), Some("cat"));
        s.record_outcome("cat", true).unwrap();
        assert_eq!(ask(&mut s).as_deref(), Some("dog"));
        s.record_outcome("dog", true).unwrap();
        assert_eq!(ask(&mut s).as_deref(), Some("bird"));
    }

    #[test]
    fn correct_streak_delays_reappearance() {
        let mut s = scheduler(&[("cat", "gato"), ("dog", "perro")]);
        assert_eq!(ask(&mut s).as_deref(), Some("cat")); // step 0
        s.record_outcome("cat", true).unwrap();
        assert_eq!(ask(&mut s).as_deref(), Some("dog")); // step 1
        s.record_outcome("dog", false).unwrap();
        // dog missed: delay 0, scanned first as the newest item
        assert_eq!(ask(&mut s).as_deref(), Some("dog")); // step 2
        s.record_outcome("dog", true).unwrap();
        // dog eligible at 2 + 1 = 3, cat at 0 + 1 = 1; newest first wins
        assert_eq!(ask(&mut s).as_deref(), Some("dog")); // step 3
        s.record_outcome("dog", true).unwrap();
        // dog now waits until 3 + 2 = 5
        assert_eq!(ask(&mut s).as_deref(), Some("cat")); // step 4
    }

    #[test]
    fn exhausted_window_grows_instead_of_stalling() {
        let settings = SchedulerSettings::new(4, 5).unwrap();
        let mut s = scheduler_with(&[("a", "1"), ("b", "2")], settings);
        assert_eq!(ask(&mut s).as_deref(), Some("a")); // step 0
        s.record_outcome("a", true).unwrap();
        // a waits until step 1, which is now: still eligible
        assert_eq!(ask(&mut s).as_deref(), Some("a")); // step 1
        s.record_outcome("a", true).unwrap();
        // a waits until 1 + 2 = 3, so b is pulled into the window
        assert_eq!(ask(&mut s).as_deref(), Some("b")); // step 2
        assert_eq!(s.second_round_start(), None);
    }

    #[test]
    fn retired_item_stays_done() {
        let mut s = scheduler(&[("only", "solo")]);
        let mut shown_at = Vec::new();
        for _ in 0..20 {
            let step = s.step();
            if let Draw::Item(_) = s.next_item() {
                s.record_outcome("only", true).unwrap();
                shown_at.push(step);
            }
        }
        // each gap equals the streak at the time, retired once it passes 4
        assert_eq!(shown_at, vec![0, 1, 3, 6, 10]);
        assert_eq!(s.stat_for("only").unwrap().streak(), 5);
        assert_eq!(s.second_round_start(), Some(2));
    }

    #[test]
    fn second_pass_respects_delay() {
        let mut s = scheduler(&[("only", "solo")]);
        assert_eq!(ask(&mut s).as_deref(), Some("only")); // step 0
        s.record_outcome("only", true).unwrap();
        assert_eq!(ask(&mut s).as_deref(), Some("only")); // step 1
        s.record_outcome("only", true).unwrap();
        // eligible again at 1 + 2 = 3
        assert_eq!(s.next_item(), Draw::Done); // step 2
        assert_eq!(s.second_round_start(), Some(2));
        assert_eq!(ask(&mut s).as_deref(), Some("only")); // step 3
        assert_eq!(s.second_round_start(), Some(2));
    }

    #[test]
    fn nothing_due_in_full_window_is_done() {
        let mut s = scheduler(&[("a", "1"), ("b", "2")]);
        let mut asked = Vec::new();
        loop {
            let Some(q) = ask(&mut s) else { break };
            s.record_outcome(&q, true).unwrap();
            asked.push(q);
            assert!(asked.len() < 20);
        }
        assert_eq!(asked, vec!["a", "b", "b", "a", "b", "a"]);
        // b due at 4 + 3 = 7, a due at 5 + 3 = 8
        assert_eq!(s.second_round_start(), Some(6));
        assert_eq!(s.step(), 7);
        assert_eq!(s.stat_for("a").unwrap().streak(), 3);
        assert_eq!(s.stat_for("b").unwrap().streak(), 3);
    }

    #[test]
    fn returned_item_is_always_due() {
        let mut s = scheduler(&[("cat", "gato"), ("dog", "perro"), ("bird", "pájaro")]);
        for round in 0..40 {
            let step = s.step();
            let due: Vec<u64> = (0..3)
                .map(|i| eligible_at(s.stat(ItemId::new(i)).unwrap()))
                .collect();
            if let Draw::Item(id) = s.next_item() {
                assert!(step >= due[id.index()], "step {step} before due {}", due[id.index()]);
                let q = s.item(id).unwrap().question().to_owned();
                s.record_outcome(&q, round % 5 != 0).unwrap();
            }
        }
    }

    proptest! {
        #[test]
        fn retired_item_is_never_returned(
            len in 1usize..6,
            answers in proptest::collection::vec(prop::bool::weighted(0.8), 1..150),
        ) {
            let names: Vec<String> = (0..len).map(|i| format!("q{i}")).collect();
            let pairs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "x")).collect();
            let mut s = scheduler(&pairs);

            for correct in answers {
                let Draw::Item(id) = s.next_item() else { break };
                prop_assert!(s.stat(id).unwrap().streak() <= 4);
                let q = s.item(id).unwrap().question().to_owned();
                s.record_outcome(&q, correct).unwrap();
            }
        }

        #[test]
        fn window_eventually_covers_the_list(len in 1usize..8) {
            let names: Vec<String> = (0..len).map(|i| format!("q{i}")).collect();
            let pairs: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "x")).collect();
            let mut s = scheduler(&pairs);
            let mut seen = std::collections::HashSet::new();

            while let Draw::Item(id) = s.next_item() {
                seen.insert(id);
                let q = s.item(id).unwrap().question().to_owned();
                s.record_outcome(&q, true).unwrap();
            }
            prop_assert_eq!(seen.len(), len);
        }
    }
}
