//! Quiz session state machine.
//!
//! A [`QuizSession`] drives one participant through a shared [`QuestionSet`]:
//!
//! ```text
//! NotStarted --start--> InProgress --submit_answer--> AwaitingNext
//!                           ^                              |
//!                           +-----------advance------------+--advance (last)--> Finished
//! ```
//!
//! Every operation checks its precondition and rejects misuse with
//! [`QuizError::State`] instead of relying on the caller to disable input.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::QuizError;
use crate::loader::QuestionSet;
use crate::model::{AnswerRecord, Question};
use crate::result::QuizResult;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    NotStarted,
    InProgress,
    AwaitingNext,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::InProgress => write!(f, "in progress"),
            SessionState::AwaitingNext => write!(f, "awaiting next"),
            SessionState::Finished => write!(f, "finished"),
        }
    }
}

/// Position within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 0-based index of the current question (== `total` once finished).
    pub current: usize,
    /// Number of questions answered so far.
    pub answered: usize,
    /// Number of questions in the set.
    pub total: usize,
}

impl Progress {
    /// 1-based question number for display, capped at `total`.
    pub fn position(&self) -> usize {
        (self.current + 1).min(self.total)
    }
}

/// What the participant sees right after answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub correct_answer: bool,
    pub explanation: String,
    /// Running score including this answer.
    pub score: usize,
}

impl AnswerFeedback {
    /// `"Correct. <explanation>"` or `"Incorrect. <explanation>"`.
    pub fn message(&self) -> String {
        let verdict = if self.is_correct {
            "Correct."
        } else {
            "Incorrect."
        };
        if self.explanation.is_empty() {
            verdict.to_string()
        } else {
            format!("{verdict} {}", self.explanation)
        }
    }
}

/// One participant's run through a question set.
pub struct QuizSession {
    id: Uuid,
    questions: Arc<QuestionSet>,
    participant_name: Option<String>,
    current_index: usize,
    score: usize,
    answer_log: Vec<AnswerRecord>,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    clock: fn() -> DateTime<Utc>,
}

impl QuizSession {
    /// Create a session in `NotStarted` bound to `questions`.
    pub fn new(questions: Arc<QuestionSet>) -> Self {
        Self {
            id: Uuid::new_v4(),
            questions,
            participant_name: None,
            current_index: 0,
            score: 0,
            answer_log: Vec::new(),
            state: SessionState::NotStarted,
            started_at: None,
            completed_at: None,
            clock: Utc::now,
        }
    }

    /// Replace the time source used for `started_at` / `completed_at`.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Begin the quiz for `name` and return the first question.
    ///
    /// # Errors
    ///
    /// - `QuizError::State` unless the session is `NotStarted`.
    /// - `QuizError::Validation` if `name` is empty after trimming.
    /// - `QuizError::EmptyQuestionSet` if there is nothing to ask.
    ///
    /// On error the session is left untouched.
    pub fn start(&mut self, name: &str) -> Result<&Question, QuizError> {
        self.expect_state("start", &[SessionState::NotStarted])?;

        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::Validation("participant name is required".into()));
        }
        if self.questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet);
        }

        self.participant_name = Some(name.to_string());
        self.current_index = 0;
        self.score = 0;
        self.answer_log.clear();
        self.started_at = Some((self.clock)());
        self.completed_at = None;
        self.state = SessionState::InProgress;

        tracing::debug!(session = %self.id, participant = name, total = self.questions.len(), "session started");
        self.current_question()
    }

    /// Record the participant's answer to the current question.
    ///
    /// # Errors
    ///
    /// `QuizError::State` unless the session is `InProgress`; in particular a
    /// second answer before [`advance`](Self::advance) is rejected and the
    /// answer log is left unchanged.
    pub fn submit_answer(&mut self, given: bool) -> Result<AnswerFeedback, QuizError> {
        self.expect_state("submit an answer", &[SessionState::InProgress])?;
        if self.answer_log.len() != self.current_index {
            return Err(self.state_error("submit an answer"));
        }

        let question = self
            .questions
            .get(self.current_index)
            .ok_or_else(|| self.state_error("submit an answer"))?;
        let record = AnswerRecord::for_question(question, given);
        let is_correct = record.is_correct();
        if is_correct {
            self.score += 1;
        }

        let feedback = AnswerFeedback {
            is_correct,
            correct_answer: record.correct_answer,
            explanation: record.explanation.clone(),
            score: self.score,
        };
        self.answer_log.push(record);
        self.state = SessionState::AwaitingNext;

        tracing::debug!(
            session = %self.id,
            question = %question.id,
            given,
            is_correct,
            score = self.score,
            "answer recorded"
        );
        Ok(feedback)
    }

    /// Move past the answered question. Returns the new state:
    /// `InProgress` if questions remain, `Finished` otherwise.
    ///
    /// # Errors
    ///
    /// `QuizError::State` unless the session is `AwaitingNext`.
    pub fn advance(&mut self) -> Result<SessionState, QuizError> {
        self.expect_state("advance", &[SessionState::AwaitingNext])?;

        self.current_index += 1;
        if self.current_index < self.questions.len() {
            self.state = SessionState::InProgress;
        } else {
            self.state = SessionState::Finished;
            self.completed_at = Some((self.clock)());
            tracing::info!(
                session = %self.id,
                score = self.score,
                total = self.questions.len(),
                "quiz finished"
            );
        }

        Ok(self.state)
    }

    /// The question currently being asked (or just answered).
    ///
    /// # Errors
    ///
    /// `QuizError::State` in `NotStarted` or `Finished`.
    pub fn current_question(&self) -> Result<&Question, QuizError> {
        self.expect_state(
            "read the current question",
            &[SessionState::InProgress, SessionState::AwaitingNext],
        )?;
        self.questions
            .get(self.current_index)
            .ok_or_else(|| self.state_error("read the current question"))
    }

    /// Produce the result record of a finished session.
    ///
    /// # Errors
    ///
    /// `QuizError::State` unless the session is `Finished`.
    pub fn summarize(&self) -> Result<QuizResult, QuizError> {
        self.expect_state("summarize", &[SessionState::Finished])?;

        let date = self.completed_at.unwrap_or_else(self.clock);
        Ok(QuizResult::new(
            self.participant_name.clone().unwrap_or_default(),
            self.score,
            self.questions.len(),
            date,
            &self.answer_log,
        ))
    }

    /// Discard this session and return a fresh one on the same question set.
    pub fn restart(self) -> QuizSession {
        tracing::debug!(session = %self.id, state = %self.state, "session discarded");
        QuizSession::new(self.questions).with_clock(self.clock)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn participant_name(&self) -> Option<&str> {
        self.participant_name.as_deref()
    }

    pub fn current_score(&self) -> usize {
        self.score
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.current_index,
            answered: self.answer_log.len(),
            total: self.questions.len(),
        }
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    pub fn questions(&self) -> &Arc<QuestionSet> {
        &self.questions
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    fn expect_state(&self, operation: &'static str, allowed: &[SessionState]) -> Result<(), QuizError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(self.state_error(operation))
        }
    }

    fn state_error(&self, operation: &'static str) -> QuizError {
        QuizError::State {
            operation,
            state: self.state,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("participant_name", &self.participant_name)
            .field("state", &self.state)
            .field("current_index", &self.current_index)
            .field("score", &self.score)
            .field("answered", &self.answer_log.len())
            .field("total", &self.questions.len())
            .finish()
    }
}
