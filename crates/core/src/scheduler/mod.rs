//! Stateful selection of the next item to drill.
//!
//! A [`Scheduler`] owns the item store, one [`ItemStat`] per item and the
//! global step counter. The actual selection rule is delegated to a
//! [`Policy`]; two are provided:
//!
//! - [`RoundRobin`]: first-to-qualify in list order, with a one-step
//!   no-repeat cool-down and a convergence sweep once a pass comes up empty.
//! - [`AdaptiveDelay`]: spaces items by their trailing correct streak,
//!   retires well-known items and introduces new ones through a growing
//!   window.
//!
//! Selection is deterministic given the recorded history.

mod adaptive;
mod round_robin;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::Error;
use crate::model::{Item, ItemId, ItemStat, ItemStore};
use crate::settings::{SchedulerSettings, SettingsError};

pub use adaptive::AdaptiveDelay;
pub use round_robin::RoundRobin;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchedulerError {
    /// The caller referenced a question this scheduler never issued.
    #[error("unknown question {question:?}")]
    UnknownItem { question: String },
}

//
// ─── DRAW ──────────────────────────────────────────────────────────────────────
//

/// Result of asking the scheduler for the next item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Draw {
    /// Present this item next.
    Item(ItemId),
    /// No item currently qualifies under the active policy.
    Done,
    /// The list has no items at all.
    Empty,
}

impl Draw {
    #[must_use]
    pub fn item(self) -> Option<ItemId> {
        match self {
            Draw::Item(id) => Some(id),
            Draw::Done | Draw::Empty => None,
        }
    }
}

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// A selection rule over per-item statistics.
///
/// `select` is only called with a non-empty `stats` slice. The scheduler
/// stamps `last_shown` on whatever the policy returns.
pub trait Policy: fmt::Debug + Send {
    fn kind(&self) -> PolicyKind;

    /// Picks the item to present at `step`, or `None` when nothing qualifies.
    fn select(&mut self, step: u64, stats: &[ItemStat]) -> Option<ItemId>;

    /// First step at which a full pass found nothing, once that has happened.
    fn second_round_start(&self) -> Option<u64>;
}

/// Names of the built-in policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    RoundRobin,
    Adaptive,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 2] = [PolicyKind::RoundRobin, PolicyKind::Adaptive];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::RoundRobin => "round-robin",
            PolicyKind::Adaptive => "adaptive",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            PolicyKind::RoundRobin => {
                "retry misses right away, then sweep until every item is right twice"
            }
            PolicyKind::Adaptive => {
                "space items by correct streak, retire mastered ones, introduce new ones gradually"
            }
        }
    }

    /// Instantiates a fresh policy of this kind.
    #[must_use]
    pub fn build(self, settings: &SchedulerSettings) -> Box<dyn Policy> {
        match self {
            PolicyKind::RoundRobin => Box::new(RoundRobin::new()),
            PolicyKind::Adaptive => Box::new(AdaptiveDelay::new(settings)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| SettingsError::UnknownPolicy(s.to_owned()))
    }
}

//
// ─── SCHEDULER ─────────────────────────────────────────────────────────────────
//

/// Per-learner drill scheduler over a fixed item list.
///
/// One instance serves a single learner's pass through one list and is not
/// meant to be shared.
///
/// # Examples
///
/// ```
/// # use drill_core::model::{Item, ItemStore};
/// # use drill_core::scheduler::{Draw, RoundRobin, Scheduler};
/// let store = ItemStore::new(vec![Item::new("cat", "gato")?])?;
/// let mut scheduler = Scheduler::new(store, Box::new(RoundRobin::new()));
///
/// let Draw::Item(id) = scheduler.next_item() else { unreachable!() };
/// assert_eq!(scheduler.item(id).map(|i| i.answer()), Some("gato"));
/// scheduler.record_outcome("cat", true)?;
/// # Ok::<(), drill_core::Error>(())
/// ```
pub struct Scheduler {
    store: ItemStore,
    stats: Vec<ItemStat>,
    step: u64,
    policy: Box<dyn Policy>,
}

impl Scheduler {
    #[must_use]
    pub fn new(store: ItemStore, policy: Box<dyn Policy>) -> Self {
        let stats = vec![ItemStat::new(); store.len()];
        Self {
            store,
            stats,
            step: 0,
            policy,
        }
    }

    /// Builds the store and a built-in policy in one go.
    ///
    /// # Errors
    ///
    /// Returns `Error::Item` for duplicate questions and `Error::Settings`
    /// for invalid settings.
    pub fn from_items(
        items: Vec<Item>,
        kind: PolicyKind,
        settings: &SchedulerSettings,
    ) -> Result<Self, Error> {
        settings.validate()?;
        let store = ItemStore::new(items)?;
        Ok(Self::new(store, kind.build(settings)))
    }

    /// Advances the step counter and returns the next item to present.
    ///
    /// An empty list yields `Draw::Empty` without touching the counter.
    pub fn next_item(&mut self) -> Draw {
        if self.store.is_empty() {
            return Draw::Empty;
        }

        let step = self.step;
        self.step += 1;

        match self.policy.select(step, &self.stats) {
            Some(id) => {
                self.stats[id.index()].mark_shown(step);
                debug!(
                    step,
                    item = %id,
                    policy = %self.policy.kind(),
                    "scheduler picked item"
                );
                Draw::Item(id)
            }
            None => {
                debug!(step, policy = %self.policy.kind(), "no item qualifies");
                Draw::Done
            }
        }
    }

    /// Appends a graded answer to the item's history.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::UnknownItem` if `question` is not in the store.
    pub fn record_outcome(&mut self, question: &str, correct: bool) -> Result<ItemId, SchedulerError> {
        let id = self.resolve(question)?;
        self.stats[id.index()].record(correct);
        Ok(id)
    }

    /// Statistics for a question.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::UnknownItem` if `question` is not in the store.
    pub fn stat_for(&self, question: &str) -> Result<&ItemStat, SchedulerError> {
        let id = self.resolve(question)?;
        Ok(&self.stats[id.index()])
    }

    /// Item for a question.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::UnknownItem` if `question` is not in the store.
    pub fn item_for(&self, question: &str) -> Result<&Item, SchedulerError> {
        let id = self.resolve(question)?;
        Ok(&self.store.items()[id.index()])
    }

    #[must_use]
    pub fn stat(&self, id: ItemId) -> Option<&ItemStat> {
        self.stats.get(id.index())
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.store.get(id)
    }

    #[must_use]
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Number of `next_item` calls that reached a policy.
    #[must_use]
    pub fn step(&self) -> u64 {
        self.step
    }

    #[must_use]
    pub fn second_round_start(&self) -> Option<u64> {
        self.policy.second_round_start()
    }

    #[must_use]
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    fn resolve(&self, question: &str) -> Result<ItemId, SchedulerError> {
        self.store
            .lookup(question)
            .ok_or_else(|| SchedulerError::UnknownItem {
                question: question.to_owned(),
            })
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("items", &self.store.len())
            .field("step", &self.step)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
