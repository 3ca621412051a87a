//! Core data model types for tfquiz.
//!
//! Questions are created once at load time and never mutated; answer records
//! are appended to a session's log and never changed afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a question, as it appeared in the source data.
///
/// Sources may use numbers or strings; both round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{n}"),
            QuestionId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for QuestionId {
    fn from(n: i64) -> Self {
        QuestionId::Number(n)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Text(s.to_string())
    }
}

/// A single true/false question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within its question set.
    pub id: QuestionId,
    /// The prompt shown to the participant. Never empty.
    pub text: String,
    /// The correct truth value.
    pub answer: bool,
    /// Shown after answering. Empty if the source had none.
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, text: impl Into<String>, answer: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            answer,
            explanation: String::new(),
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// One answered question in a session's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub question_text: String,
    pub given_answer: bool,
    pub correct_answer: bool,
    pub explanation: String,
}

impl AnswerRecord {
    pub(crate) fn for_question(question: &Question, given_answer: bool) -> Self {
        Self {
            question_id: question.id.clone(),
            question_text: question.text.clone(),
            given_answer,
            correct_answer: question.answer,
            explanation: question.explanation.clone(),
        }
    }

    pub fn is_correct(&self) -> bool {
        self.given_answer == self.correct_answer
    }
}
