use serde::Serialize;

use drill_core::model::{Item, answers_match};

/// Outcome of checking one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub correct: bool,
    pub question: String,
    pub submitted: String,
    /// Short answer that was expected.
    pub expected: String,
    /// Annotated answer, present only on a miss.
    pub full_answer: Option<String>,
}

/// Compares a submission to the item's short answer, ignoring case and
/// surrounding whitespace.
#[must_use]
pub fn grade(item: &Item, submitted: &str) -> Grade {
    let correct = answers_match(item.answer(), submitted);
    Grade {
        correct,
        question: item.question().to_owned(),
        submitted: submitted.to_owned(),
        expected: item.answer().to_owned(),
        full_answer: (!correct).then(|| item.full_answer().to_owned()),
    }
}
