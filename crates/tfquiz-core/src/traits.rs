//! Trait definitions for question sources and result sinks.
//!
//! These async traits are implemented by the `tfquiz-io` crate.

use async_trait::async_trait;

use crate::result::QuizResult;

/// Somewhere raw question data can be fetched from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable location (path or URL), used in errors and logs.
    fn describe(&self) -> String;

    /// Fetch the raw JSON document.
    async fn fetch(&self) -> anyhow::Result<Vec<u8>>;
}

/// An external destination for a finished quiz result.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Short sink name (e.g. "file", "webhook").
    fn name(&self) -> &str;

    /// Hand the result over. Returns a human-readable receipt
    /// (a file path, a URL, ...).
    async fn deliver(&self, result: &QuizResult) -> anyhow::Result<String>;
}
