use thiserror::Error;

use crate::model::ItemError;
use crate::scheduler::SchedulerError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
