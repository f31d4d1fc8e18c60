use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemError {
    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error("answer for {question:?} cannot be empty")]
    EmptyAnswer { question: String },

    #[error("duplicate question {question:?}")]
    DuplicateQuestion { question: String },
}

//
// ─── ANNOTATIONS ───────────────────────────────────────────────────────────────
//

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("annotation pattern is valid"));

/// Removes parenthesized groups such as `(formal)` and trims the result.
///
/// Unclosed parentheses are left alone.
///
/// ```
/// # use drill_core::model::strip_annotations;
/// assert_eq!(strip_annotations("la casa (f.)"), "la casa");
/// assert_eq!(strip_annotations("(to) run"), "run");
/// ```
#[must_use]
pub fn strip_annotations(text: &str) -> String {
    ANNOTATION.replace_all(text, "").trim().to_owned()
}

/// Key under which two answers count as the same: trimmed and lower-cased.
#[must_use]
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether `submitted` would be graded as `expected`.
#[must_use]
pub fn answers_match(expected: &str, submitted: &str) -> bool {
    normalize_answer(expected) == normalize_answer(submitted)
}

//
// ─── ITEM ──────────────────────────────────────────────────────────────────────
//

/// A question/answer pair to be drilled.
///
/// `answer` is what gets graded; `full_answer` keeps any annotations and is
/// only shown as feedback after a miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    question: String,
    answer: String,
    full_answer: String,
}

impl Item {
    /// Builds an item from a question and its annotated answer.
    ///
    /// The short answer is derived by stripping annotations. When stripping
    /// leaves nothing, the trimmed full answer is graded instead.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` if either side is blank.
    pub fn new(
        question: impl Into<String>,
        full_answer: impl Into<String>,
    ) -> Result<Self, ItemError> {
        let full_answer = full_answer.into();
        let stripped = strip_annotations(&full_answer);
        let answer = if stripped.is_empty() {
            full_answer.trim().to_owned()
        } else {
            stripped
        };
        Self::from_parts(question, answer, full_answer)
    }

    /// Builds an item from already-normalized parts.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` if the question or either answer is blank.
    pub fn from_parts(
        question: impl Into<String>,
        answer: impl Into<String>,
        full_answer: impl Into<String>,
    ) -> Result<Self, ItemError> {
        let question = question.into().trim().to_owned();
        if question.is_empty() {
            return Err(ItemError::EmptyQuestion);
        }
        let answer = answer.into();
        let full_answer = full_answer.into();
        if answer.trim().is_empty() || full_answer.trim().is_empty() {
            return Err(ItemError::EmptyAnswer { question });
        }

        Ok(Self {
            question,
            answer,
            full_answer,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn full_answer(&self) -> &str {
        &self.full_answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_match_ignores_case_and_padding() {
        assert!(answers_match("Gato", " gato "));
        assert!(answers_match("ÉL", "él"));
        assert!(!answers_match("gato", "gata"));
        assert_eq!(normalize_answer("  El Perro "), "el perro");
    }

    #[test]
    fn strips_every_parenthesized_group() {
        assert_eq!(strip_annotations("ir (a) casa (coll.)"), "ir  casa");
        assert_eq!(strip_annotations("no parens"), "no parens");
        assert_eq!(strip_annotations("open (paren"), "open (paren");
    }

    #[test]
    fn new_item_keeps_full_answer() {
        let item = Item::new("house", "la casa (f.)").unwrap();
        assert_eq!(item.question(), "house");
        assert_eq!(item.answer(), "la casa");
        assert_eq!(item.full_answer(), "la casa (f.)");
    }

    #[test]
    fn fully_annotated_answer_falls_back_to_full_text() {
        let item = Item::new("q", " (only a note) ").unwrap();
        assert_eq!(item.answer(), "(only a note)");
    }

    #[test]
    fn blank_sides_are_rejected() {
        assert_eq!(Item::new("  ", "x").unwrap_err(), ItemError::EmptyQuestion);
        assert!(matches!(
            Item::new("q", "   ").unwrap_err(),
            ItemError::EmptyAnswer { .. }
        ));
    }
}
