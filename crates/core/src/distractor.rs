//! Multiple-choice distractors merged across similarity granularities.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::model::normalize_answer;
use crate::similarity::{ShingleIndex, SimilarityIndex};

/// Default number of wrong answers offered per question.
pub const DEFAULT_CHOICE_COUNT: usize = 10;

/// Shingle sizes queried by [`DistractorAggregator::shingled`], most specific first.
pub const DEFAULT_GRANULARITIES: [usize; 3] = [3, 2, 1];

/// Builds wrong-answer choice sets from one or more similarity indexes.
///
/// Indexes are consulted from the most specific granularity down. Each level
/// only contributes while the target count has not been reached.
pub struct DistractorAggregator {
    levels: Vec<Box<dyn SimilarityIndex>>,
}

impl DistractorAggregator {
    /// Orders `levels` by descending granularity.
    #[must_use]
    pub fn new(mut levels: Vec<Box<dyn SimilarityIndex>>) -> Self {
        levels.sort_by_key(|level| std::cmp::Reverse(level.granularity()));
        Self { levels }
    }

    /// Shingle indexes at 3, 2 and 1 characters over `answers`.
    ///
    /// Build this over the whole list, not just the drilled segment, so small
    /// segments still get enough distractors.
    #[must_use]
    pub fn shingled<'a>(answers: impl IntoIterator<Item = &'a str>) -> Self {
        let answers: Vec<&str> = answers.into_iter().collect();
        let levels = DEFAULT_GRANULARITIES
            .iter()
            .map(|n| Box::new(ShingleIndex::new(*n, answers.iter().copied())) as Box<dyn SimilarityIndex>)
            .collect();
        Self::new(levels)
    }

    /// Up to `target_count` distinct wrong answers in rank order.
    ///
    /// Answers are compared the way grading compares them, so the set never
    /// holds `answer` or a case variant of it, nor two variants of each other.
    #[must_use]
    pub fn ranked_choices(&self, answer: &str, target_count: usize) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::from([normalize_answer(answer)]);
        let mut choices = Vec::with_capacity(target_count);

        for level in &self.levels {
            if choices.len() >= target_count {
                break;
            }
            for scored in level.find_similar(answer) {
                if choices.len() >= target_count {
                    break;
                }
                if !seen.insert(normalize_answer(&scored.candidate)) {
                    continue;
                }
                choices.push(scored.candidate);
            }
            debug!(
                granularity = level.granularity(),
                collected = choices.len(),
                target_count,
                "distractor level consumed"
            );
        }

        choices
    }

    /// Same set as [`ranked_choices`](Self::ranked_choices), shuffled so
    /// presentation order does not reveal rank.
    ///
    /// An empty result means no similar answers exist; fall back to free-text
    /// entry.
    #[must_use]
    pub fn choices_for(&self, answer: &str, target_count: usize) -> Vec<String> {
        self.choices_for_with_rng(answer, target_count, &mut rand::rng())
    }

    pub fn choices_for_with_rng<R: Rng>(
        &self,
        answer: &str,
        target_count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let mut choices = self.ranked_choices(answer, target_count);
        choices.shuffle(rng);
        choices
    }
}

impl fmt::Debug for DistractorAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let granularities: Vec<usize> = self.levels.iter().map(|l| l.granularity()).collect();
        f.debug_struct("DistractorAggregator")
            .field("granularities", &granularities)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
