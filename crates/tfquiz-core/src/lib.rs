//! Question sets, the quiz session state machine, and results.
//!
//! This crate defines the data model, the question loader, and the session
//! logic that every other tfquiz crate builds on.

pub mod error;
pub mod loader;
pub mod model;
pub mod result;
pub mod session;
pub mod traits;

pub use error::{LoadError, QuizError};
pub use loader::{LoadOptions, QuestionSet};
pub use model::{AnswerRecord, Question, QuestionId};
pub use result::QuizResult;
pub use session::{AnswerFeedback, Progress, QuizSession, SessionState};
