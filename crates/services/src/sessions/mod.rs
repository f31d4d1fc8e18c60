mod builder;
mod progress;
mod service;
mod summary;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use builder::QuizBuilder;
pub use progress::SessionProgress;
pub use service::{Prompt, QuizSession, QuizStep, SessionId};
pub use summary::{ItemSummary, SessionSummary};
pub use workflow::QuizService;
