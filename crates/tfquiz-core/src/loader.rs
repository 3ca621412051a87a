//! Question set loader.
//!
//! Fetches question records from a [`QuestionSource`], normalizes them, and
//! validates the result.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::LoadError;
use crate::model::{Question, QuestionId};
use crate::traits::QuestionSource;

/// Intermediate structure for a question record as it appears in the source.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    id: Option<QuestionId>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    answer: Option<bool>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Knobs for normalizing raw records.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Treat a record without `answer` as `false` instead of rejecting it.
    pub coerce_missing_answer: bool,
}

/// An ordered, immutable collection of questions.
///
/// Order is the presentation order and is never shuffled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a set from already-normalized questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Fetch and parse a question set from `source`.
    pub async fn load(source: &dyn QuestionSource, options: LoadOptions) -> Result<Self, LoadError> {
        let source_name = source.describe();
        let bytes = source.fetch().await.map_err(|e| LoadError::Fetch {
            source_name: source_name.clone(),
            cause: e.into(),
        })?;

        let set = Self::from_json_slice(&bytes, options)?;
        tracing::info!(source = %source_name, questions = set.len(), "loaded question set");
        Ok(set)
    }

    /// Parse a JSON document held in memory.
    pub fn from_json_str(content: &str, options: LoadOptions) -> Result<Self, LoadError> {
        Self::from_json_slice(content.as_bytes(), options)
    }

    fn from_json_slice(bytes: &[u8], options: LoadOptions) -> Result<Self, LoadError> {
        let raw: Vec<RawQuestion> = serde_json::from_slice(bytes)?;
        Self::normalize(raw, options)
    }

    fn normalize(raw: Vec<RawQuestion>, options: LoadOptions) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        let mut questions = Vec::with_capacity(raw.len());

        for (index, record) in raw.into_iter().enumerate() {
            let position = index + 1;

            let text = match record.text {
                Some(t) if !t.trim().is_empty() => t,
                _ => return Err(LoadError::MissingText { position }),
            };

            let answer = match record.answer {
                Some(a) => a,
                None if options.coerce_missing_answer => {
                    tracing::warn!(position, "question has no answer, treating it as false");
                    false
                }
                None => return Err(LoadError::MissingAnswer { position }),
            };

            let id = match record.id {
                Some(id) => id,
                None => i64::try_from(position)
                    .map(QuestionId::Number)
                    .unwrap_or_else(|_| QuestionId::Text(position.to_string())),
            };
            if !seen.insert(id.clone()) {
                return Err(LoadError::DuplicateId { id });
            }

            questions.push(Question {
                id,
                text,
                answer,
                explanation: record.explanation.unwrap_or_default(),
            });
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// A non-fatal issue found in a loaded question set.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// Check a question set for issues that do not prevent loading it.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "question set is empty, a quiz cannot be started".into(),
        });
        return warnings;
    }

    for q in set {
        if q.explanation.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "no explanation provided".into(),
            });
        }
    }

    // A set where every answer is the same can be beaten without reading it
    if set.len() > 1 {
        let first = set.questions[0].answer;
        if set.iter().all(|q| q.answer == first) {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!("every answer is {first}"),
            });
        }
    }

    warnings
}
