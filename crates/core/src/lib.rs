#![forbid(unsafe_code)]

pub mod distractor;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod settings;
pub mod similarity;

pub use error::Error;
pub use scheduler::{Draw, PolicyKind, Scheduler};
