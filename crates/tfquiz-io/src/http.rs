//! HTTP question source.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use tfquiz_core::traits::QuestionSource;

use crate::error::TransferError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches questions with a GET request, e.g. a `questions.json` next to a
/// hosted quiz page.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> anyhow::Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
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

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransferError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
