//! Text-similarity lookups used to find plausible wrong answers.

mod shingle;

pub use shingle::ShingleIndex;

/// A candidate answer and how similar it is to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub score: f64,
    pub candidate: String,
}

impl Scored {
    #[must_use]
    pub fn new(score: f64, candidate: impl Into<String>) -> Self {
        Self {
            score,
            candidate: candidate.into(),
        }
    }
}

/// Ranked similarity search at one granularity.
pub trait SimilarityIndex: Send + Sync {
    /// Shingle size this index compares at. Larger is more specific.
    fn granularity(&self) -> usize;

    /// Candidates most similar to `text`, best first.
    ///
    /// Implementations never return `text` itself.
    fn find_similar(&self, text: &str) -> Vec<Scored>;
}
