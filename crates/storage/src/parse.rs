//! Plain-text word list format.
//!
//! One pair per line, question and answer separated by a backslash:
//!
//! ```text
//! # animals
//! cat \ el gato (m.)
//! dog \ el perro (m.)
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. A `###reversed`
//! marker near the top means the file lists answers first.

use std::collections::HashSet;

use drill_core::model::{Item, ItemError};
use tracing::warn;

/// Marks a file whose columns are stored answer-first.
pub const REVERSED_MARKER: &str = "###reversed";

/// Only this many leading bytes are searched for [`REVERSED_MARKER`].
const MARKER_SCAN_BYTES: usize = 512;

/// A parsed list: raw pairs in file order plus the file-level direction flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    name: String,
    pairs: Vec<(String, String)>,
    reversed: bool,
}

impl WordList {
    /// Parses list text. Malformed lines are skipped with a warning.
    #[must_use]
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        let name = name.into();
        let reversed = head_contains(text, REVERSED_MARKER);

        let mut pairs = Vec::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((question, answer)) = line.split_once('\\') else {
                warn!(list = %name, line = number + 1, "skipping line without separator");
                continue;
            };
            let (question, answer) = (question.trim(), answer.trim());
            if question.is_empty() || answer.is_empty() {
                warn!(list = %name, line = number + 1, "skipping line with an empty side");
                continue;
            }
            pairs.push((question.to_owned(), answer.to_owned()));
        }

        Self {
            name,
            pairs,
            reversed,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the file carries the reversed marker.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Converts pairs into drill items.
    ///
    /// `from_english` asks for the second column as the question; a reversed
    /// file flips that request. Annotations are stripped from the answer only
    /// after the swap. Later duplicates of a question are dropped.
    ///
    /// # Errors
    ///
    /// Returns `ItemError` if a pair cannot form a valid item.
    pub fn into_items(self, from_english: bool) -> Result<Vec<Item>, ItemError> {
        let swap = from_english != self.reversed;
        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(self.pairs.len());

        for (left, right) in self.pairs {
            let (question, answer) = if swap { (right, left) } else { (left, right) };
            if !seen.insert(question.clone()) {
                warn!(list = %self.name, %question, "dropping duplicate question");
                continue;
            }
            items.push(Item::new(question, answer)?);
        }

        Ok(items)
    }
}

fn head_contains(text: &str, marker: &str) -> bool {
    let head = &text.as_bytes()[..text.len().min(MARKER_SCAN_BYTES)];
    head.windows(marker.len()).any(|w| w == marker.as_bytes())
}
