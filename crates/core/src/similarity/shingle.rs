use std::collections::HashSet;

use super::{Scored, SimilarityIndex};
use crate::model::answers_match;

/// Jaccard similarity over lower-cased character n-grams.
///
/// Texts shorter than `n` characters are treated as a single shingle.
#[derive(Debug, Clone)]
pub struct ShingleIndex {
    n: usize,
    entries: Vec<(String, HashSet<String>)>,
}

impl ShingleIndex {
    /// Indexes each distinct text once, keeping first-seen order.
    #[must_use]
    pub fn new<'a>(n: usize, texts: impl IntoIterator<Item = &'a str>) -> Self {
        let n = n.max(1);
        let mut seen = HashSet::new();
        let entries = texts
            .into_iter()
            .filter(|text| seen.insert(*text))
            .map(|text| (text.to_owned(), shingles(text, n)))
            .collect();
        Self { n, entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SimilarityIndex for ShingleIndex {
    fn granularity(&self) -> usize {
        self.n
    }

    #[allow(clippy::cast_precision_loss)]
    fn find_similar(&self, text: &str) -> Vec<Scored> {
        let query = shingles(text, self.n);
        if query.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<Scored> = self
            .entries
            .iter()
            .filter(|(candidate, _)| !answers_match(candidate, text))
            .filter_map(|(candidate, grams)| {
                let shared = query.intersection(grams).count();
                if shared == 0 {
                    return None;
                }
                let union = query.len() + grams.len() - shared;
                Some(Scored::new(shared as f64 / union as f64, candidate.clone()))
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.candidate.cmp(&b.candidate))
        });
        ranked
    }
}

fn shingles(text: &str, n: usize) -> HashSet<String> {
    let chars: Vec<char> = text.trim().to_lowercase().chars().collect();
    if chars.is_empty() {
        return HashSet::new();
    }
    if chars.len() <= n {
        return HashSet::from([chars.iter().collect::<String>()]);
    }
    chars.windows(n).map(|w| w.iter().collect::<String>()).collect()
}
