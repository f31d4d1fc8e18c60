use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use drill_core::distractor::DistractorAggregator;
use drill_core::model::ItemId;
use drill_core::{Draw, Scheduler};

use super::progress::SessionProgress;
use super::summary::{ItemSummary, SessionSummary};
use crate::error::SessionError;
use crate::grading::{Grade, grade};

//
// ─── IDS ───────────────────────────────────────────────────────────────────────
//

/// Random identifier for one learner's run through a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── PROMPT ────────────────────────────────────────────────────────────────────
//

/// A question ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub item: ItemId,
    pub question: String,
    /// Shuffled options including the correct answer; `None` means free text.
    pub choices: Option<Vec<String>>,
}

/// What the session wants to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Ask(Prompt),
    /// Nothing left to ask on this pass.
    Finished,
    /// The list had no items after filtering.
    NothingToAsk,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's drill over one list.
///
/// Wires the scheduler to presentation: draws prompts, attaches
/// multiple-choice options when configured, grades submissions and feeds the
/// outcome back to the scheduler.
pub struct QuizSession {
    id: SessionId,
    list: String,
    scheduler: Scheduler,
    distractors: Option<DistractorAggregator>,
    choice_count: usize,
    pending: Option<ItemId>,
    answered: usize,
    correct: usize,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    rng: StdRng,
}

impl QuizSession {
    pub(crate) fn new(
        list: String,
        scheduler: Scheduler,
        distractors: Option<DistractorAggregator>,
        choice_count: usize,
        started_at: DateTime<Utc>,
        rng: StdRng,
    ) -> Self {
        Self {
            id: SessionId::random(),
            list,
            scheduler,
            distractors,
            choice_count,
            pending: None,
            answered: 0,
            correct: 0,
            started_at,
            completed_at: None,
            rng,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn list(&self) -> &str {
        &self.list
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Item drawn by the last `next_prompt` and not yet answered.
    #[must_use]
    pub fn pending(&self) -> Option<ItemId> {
        self.pending
    }

    /// Draws the next question.
    ///
    /// Drawing again without answering simply replaces the pending item.
    pub fn next_prompt(&mut self, now: DateTime<Utc>) -> QuizStep {
        match self.scheduler.next_item() {
            Draw::Item(id) => {
                self.pending = Some(id);
                // a fresh draw after finishing reopens the session
                self.completed_at = None;
                QuizStep::Ask(self.prompt_for(id))
            }
            Draw::Done => {
                self.pending = None;
                if self.completed_at.is_none() {
                    info!(
                        session = %self.id,
                        list = %self.list,
                        answered = self.answered,
                        correct = self.correct,
                        "quiz session finished"
                    );
                    self.completed_at = Some(now);
                }
                QuizStep::Finished
            }
            Draw::Empty => {
                info!(session = %self.id, list = %self.list, "word list has no items");
                QuizStep::NothingToAsk
            }
        }
    }

    fn prompt_for(&mut self, id: ItemId) -> Prompt {
        let item = &self.scheduler.store().items()[id.index()];
        let question = item.question().to_owned();
        let answer = item.answer().to_owned();

        let choices = self.distractors.as_ref().and_then(|agg| {
            let mut options = agg.choices_for_with_rng(&answer, self.choice_count, &mut self.rng);
            if options.is_empty() {
                debug!(%question, "no distractors, falling back to free text");
                return None;
            }
            let slot = self.rng.random_range(0..=options.len());
            options.insert(slot, answer.clone());
            Some(options)
        });

        Prompt {
            item: id,
            question,
            choices,
        }
    }

    /// Grades `submitted` for `question` and records the outcome.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Scheduler` if `question` is not part of this
    /// session's list.
    pub fn answer(&mut self, question: &str, submitted: &str) -> Result<Grade, SessionError> {
        let result = grade(self.scheduler.item_for(question)?, submitted);
        let id = self.scheduler.record_outcome(question, result.correct)?;

        self.answered += 1;
        if result.correct {
            self.correct += 1;
        }
        if self.pending == Some(id) {
            self.pending = None;
        }
        debug!(session = %self.id, %question, correct = result.correct, "answer graded");
        Ok(result)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let items_seen = self
            .scheduler
            .store()
            .iter()
            .filter(|(id, _)| {
                self.scheduler
                    .stat(*id)
                    .is_some_and(|s| s.last_shown().is_some())
            })
            .count();
        SessionProgress {
            total_items: self.scheduler.store().len(),
            items_seen,
            answered: self.answered,
            correct: self.correct,
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let items = self
            .scheduler
            .store()
            .iter()
            .filter_map(|(id, item)| {
                self.scheduler.stat(id).map(|stat| ItemSummary {
                    question: item.question().to_owned(),
                    right: stat.right(),
                    wrong: stat.wrong(),
                    streak: stat.streak(),
                })
            })
            .collect();

        SessionSummary {
            id: self.id,
            list: self.list.clone(),
            policy: self.scheduler.policy_kind(),
            started_at: self.started_at,
            completed_at: self.completed_at,
            answered: self.answered,
            correct: self.correct,
            items,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("list", &self.list)
            .field("scheduler", &self.scheduler)
            .field("pending", &self.pending)
            .field("answered", &self.answered)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}
