//! In-memory source and sink, for tests and embedding.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use tfquiz_core::result::QuizResult;
use tfquiz_core::traits::{QuestionSource, ResultSink};

/// Serves a fixed JSON document.
pub struct StaticSource {
    label: String,
    body: Vec<u8>,
}

impl StaticSource {
    pub fn new(label: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            label: label.to_string(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    async fn fetch(&self) -> anyhow::Result<Vec<u8>> {
        Ok(self.body.clone())
    }
}

/// Collects delivered results.
#[derive(Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<QuizResult>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, oldest first.
    ///
    /// A poisoned lock still yields the results pushed before the panic.
    pub fn delivered(&self) -> Vec<QuizResult> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn deliver(&self, result: &QuizResult) -> anyhow::Result<String> {
        let mut delivered = self
            .delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        delivered.push(result.clone());
        Ok(format!("memory #{}", delivered.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tfquiz_core::loader::{LoadOptions, QuestionSet};
    use tfquiz_core::session::{QuizSession, SessionState};

    const QUESTIONS: &str = r#"[
        {"id": 1, "text": "Sky is blue", "answer": true},
        {"id": 2, "text": "Fish can fly", "answer": false}
    ]"#;

    #[tokio::test]
    async fn load_play_and_deliver() {
        let source = StaticSource::new("fixture", QUESTIONS);
        let set = Arc::new(QuestionSet::load(&source, LoadOptions::default()).await.unwrap());

        let mut session = QuizSession::new(set);
        session.start("Ada").unwrap();
        session.submit_answer(true).unwrap();
        session.advance().unwrap();
        session.submit_answer(true).unwrap();
        assert_eq!(session.advance().unwrap(), SessionState::Finished);

        let sink = MemorySink::new();
        let receipt = sink.deliver(&session.summarize().unwrap()).await.unwrap();
        assert_eq!(receipt, "memory #1");

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].score, 1);
        assert_eq!(delivered[0].total, 2);
    }

    #[tokio::test]
    async fn poisoned_sink_keeps_its_results() {
        let sink = Arc::new(MemorySink::new());
        let result = QuizResult::new("Ada".into(), 0, 0, chrono::Utc::now(), &[]);
        sink.deliver(&result).await.unwrap();

        let poisoner = Arc::clone(&sink);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.delivered.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(sink.delivered.is_poisoned());

        assert_eq!(sink.delivered().len(), 1);
        assert_eq!(sink.deliver(&result).await.unwrap(), "memory #2");
        assert_eq!(sink.delivered().len(), 2);
    }
}
