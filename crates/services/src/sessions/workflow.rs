use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::WordListRepository;

use crate::error::SessionError;
use crate::options::QuizOptions;

use super::builder::QuizBuilder;
use super::service::QuizSession;

/// Starts quiz sessions for lists held in a repository.
#[derive(Clone)]
pub struct QuizService {
    lists: Arc<dyn WordListRepository>,
    options: QuizOptions,
}

impl QuizService {
    #[must_use]
    pub fn new(lists: Arc<dyn WordListRepository>, options: QuizOptions) -> Self {
        Self { lists, options }
    }

    #[must_use]
    pub fn options(&self) -> &QuizOptions {
        &self.options
    }

    /// Names of every list the repository offers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the repository cannot be listed.
    pub fn available_lists(&self) -> Result<Vec<String>, SessionError> {
        Ok(self.lists.list_names()?)
    }

    /// Loads `list` and prepares a fresh session over it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for storage failures or invalid options.
    pub fn start(&self, list: &str, now: DateTime<Utc>) -> Result<QuizSession, SessionError> {
        let parsed = self.lists.load(list)?;
        QuizBuilder::new(self.options.clone()).build(parsed, now)
    }
}

impl std::fmt::Debug for QuizService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
