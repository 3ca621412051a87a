//! Quiz error types.
//!
//! `LoadError` covers everything that can go wrong before a session exists;
//! `QuizError` is what the session operations return to the presentation layer.

use thiserror::Error;

use crate::model::QuestionId;
use crate::session::SessionState;

/// Errors produced while fetching and normalizing a question set.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read (missing file, unreachable host, ...).
    #[error("failed to fetch questions from {source_name}")]
    Fetch {
        source_name: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The source was read but is not a JSON array of question records.
    #[error("malformed question data: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record has no prompt text.
    #[error("question at position {position} has no text")]
    MissingText { position: usize },

    /// A record has no `answer` field and coercion is disabled.
    #[error("question at position {position} has no answer")]
    MissingAnswer { position: usize },

    /// Two records resolve to the same id.
    #[error("duplicate question id: {id}")]
    DuplicateId { id: QuestionId },
}

/// Errors returned by quiz session operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Bad user input; the caller should re-prompt.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The operation is not allowed in the session's current state.
    #[error("cannot {operation} while session is {state}")]
    State {
        operation: &'static str,
        state: SessionState,
    },

    /// The session was started against a set with no questions.
    #[error("question set is empty")]
    EmptyQuestionSet,
}

impl QuizError {
    /// Returns `true` if the caller can fix the problem by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QuizError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_validation_is_recoverable() {
        assert!(QuizError::Validation("empty name".into()).is_recoverable());
        assert!(!QuizError::EmptyQuestionSet.is_recoverable());
        assert!(!QuizError::State {
            operation: "advance",
            state: SessionState::InProgress,
        }
        .is_recoverable());
    }

    #[test]
    fn state_error_message_names_operation_and_state() {
        let err = QuizError::State {
            operation: "summarize",
            state: SessionState::AwaitingNext,
        };
        assert_eq!(
            err.to_string(),
            "cannot summarize while session is awaiting next"
        );
    }
}
