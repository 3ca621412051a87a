//! Webhook result sink.
//!
//! POSTs the exported result as JSON to a configured URL, for example a
//! spreadsheet script that collects quiz results. Only used when explicitly
//! requested after a quiz has finished.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use tfquiz_core::result::QuizResult;
use tfquiz_core::traits::ResultSink;

use crate::error::TransferError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sends results to an HTTP endpoint.
pub struct WebhookSink {
    url: String,
    headers: HashMap<String, String>,
    client: reqwest::Client,
}

impl WebhookSink {
    pub fn new(url: &str, headers: HashMap<String, String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            url: url.to_string(),
            headers,
            client,
        })
    }
}

#[async_trait]
impl ResultSink for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    #[instrument(skip(self, result), fields(url = %self.url, participant = %result.name))]
    async fn deliver(&self, result: &QuizResult) -> anyhow::Result<String> {
        let mut request = self.client.post(&self.url).json(result);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransferError::Http {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        tracing::info!("result submitted");
        Ok(self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tfquiz_core::model::{AnswerRecord, QuestionId};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_result() -> QuizResult {
        let date = chrono::Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let records = vec![AnswerRecord {
            question_id: QuestionId::Number(1),
            question_text: "Sky is blue".into(),
            given_answer: true,
            correct_answer: true,
            explanation: String::new(),
        }];
        QuizResult::new("Ada".into(), 1, 1, date, &records)
    }

    #[tokio::test]
    async fn posts_exact_export_json() {
        let server = MockServer::start().await;

        let expected = serde_json::json!({
            "name": "Ada",
            "score": 1,
            "total": 1,
            "date": "2026-10-18T09:30:00.000Z",
            "answers": [
                {"id": 1, "text": "Sky is blue", "given": true, "correct": true, "explanation": ""}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/exec"))
            .and(header("x-quiz-token", "secret"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HashMap::new();
        headers.insert("x-quiz-token".to_string(), "secret".to_string());
        let sink = WebhookSink::new(&format!("{}/exec", server.uri()), headers).unwrap();

        let receipt = sink.deliver(&make_result()).await.unwrap();
        assert!(receipt.ends_with("/exec"));
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("script crashed"))
            .mount(&server)
            .await;

        let sink = WebhookSink::new(&server.uri(), HashMap::new()).unwrap();
        let err = sink.deliver(&make_result()).await.unwrap_err();

        let transfer = err.downcast_ref::<TransferError>().unwrap();
        assert!(matches!(transfer, TransferError::Http { status: 500, .. }));
        assert!(err.to_string().contains("script crashed"));
    }
}
