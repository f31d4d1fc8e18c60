#![forbid(unsafe_code)]

pub mod error;
pub mod grading;
pub mod options;
pub mod sessions;

pub use sessions as session;

pub use error::SessionError;
pub use grading::{Grade, grade};
pub use options::QuizOptions;
pub use sessions::{
    ItemSummary, Prompt, QuizBuilder, QuizService, QuizSession, QuizStep, SessionId,
    SessionProgress, SessionSummary,
};
