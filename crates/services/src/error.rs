//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::scheduler::SchedulerError;
use drill_core::settings::SettingsError;
use storage::StorageError;

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] drill_core::Error),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<drill_core::model::ItemError> for SessionError {
    fn from(err: drill_core::model::ItemError) -> Self {
        Self::Core(err.into())
    }
}
