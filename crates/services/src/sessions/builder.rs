use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use drill_core::Scheduler;
use drill_core::distractor::DistractorAggregator;
use drill_core::model::Item;
use storage::WordList;

use crate::error::SessionError;
use crate::options::QuizOptions;

use super::service::QuizSession;

/// Turns a parsed word list into a ready-to-run `QuizSession`.
///
/// Order of preparation: direction swap, distractor indexes over the whole
/// list, segment selection, reordering, then the scheduler.
#[derive(Debug, Clone, Default)]
pub struct QuizBuilder {
    options: QuizOptions,
}

impl QuizBuilder {
    #[must_use]
    pub fn new(options: QuizOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &QuizOptions {
        &self.options
    }

    /// # Errors
    ///
    /// Returns `SessionError` for invalid options or items.
    pub fn build(self, list: WordList, started_at: DateTime<Utc>) -> Result<QuizSession, SessionError> {
        self.build_with_rng(list, started_at, &mut rand::rng())
    }

    /// Like [`build`](Self::build) with caller-provided randomness, which also
    /// seeds the session's own choice shuffling.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for invalid options or items.
    pub fn build_with_rng<R: Rng>(
        self,
        list: WordList,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<QuizSession, SessionError> {
        let options = self.options;
        options.validate()?;

        let name = list.name().to_owned();
        let all_items = list.into_items(options.from_english)?;

        let distractors = options
            .provide_choices
            .then(|| DistractorAggregator::shingled(all_items.iter().map(Item::answer)));

        let selected = options.segment.select(&all_items);
        let ordered = options.reorder.apply(selected, rng);
        let scheduler = Scheduler::from_items(ordered, options.policy, &options.scheduler)?;

        info!(
            list = %name,
            items = scheduler.store().len(),
            of = all_items.len(),
            policy = %options.policy,
            reorder = %options.reorder,
            choices = options.provide_choices,
            "quiz session prepared"
        );

        Ok(QuizSession::new(
            name,
            scheduler,
            distractors,
            options.choice_count,
            started_at,
            StdRng::seed_from_u64(rng.random()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{Reorder, Segment};
    use drill_core::scheduler::PolicyKind;

    const LIST: &str = "a \\ 1\nb \\ 2\nc \\ 3\nd \\ 4\ne \\ 5\n";

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn segment_limits_scheduled_items() {
        let options = QuizOptions::default().with_segment(Segment::multi([3..5, 0..1]).unwrap());
        let session = QuizBuilder::new(options)
            .build_with_rng(WordList::parse("l", LIST), now(), &mut rng())
            .unwrap();
        let questions: Vec<_> = session
            .scheduler()
            .store()
            .items()
            .iter()
            .map(|i| i.question().to_owned())
            .collect();
        assert_eq!(questions, vec!["d", "e", "a"]);
    }

    #[test]
    fn shuffle_keeps_every_selected_item() {
        let options = QuizOptions::default().with_reorder(Reorder::Shuffle);
        let session = QuizBuilder::new(options)
            .build_with_rng(WordList::parse("l", LIST), now(), &mut rng())
            .unwrap();
        let mut questions: Vec<_> = session
            .scheduler()
            .store()
            .items()
            .iter()
            .map(|i| i.question().to_owned())
            .collect();
        questions.sort();
        assert_eq!(questions, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn invalid_options_fail_before_parsing() {
        let options = QuizOptions::default().with_choices(0);
        let err = QuizBuilder::new(options)
            .build(WordList::parse("l", LIST), now())
            .unwrap_err();
        assert!(matches!(err, SessionError::Settings(_)));
    }

    #[test]
    fn policy_choice_reaches_scheduler() {
        let options = QuizOptions::default().with_policy(PolicyKind::Adaptive);
        let session = QuizBuilder::new(options)
            .build(WordList::parse("l", LIST), now())
            .unwrap();
        assert_eq!(session.scheduler().policy_kind(), PolicyKind::Adaptive);
    }
}
