//! Local file source and sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use tfquiz_core::result::QuizResult;
use tfquiz_core::traits::{QuestionSource, ResultSink};

use crate::error::TransferError;

/// Reads questions from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> anyhow::Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(TransferError::from)?;
        Ok(bytes)
    }
}

/// Writes each result as `quiz-results-<name>.json` into a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where `result` will be written.
    pub fn path_for(&self, result: &QuizResult) -> PathBuf {
        self.dir.join(result.file_name())
    }
}

#[async_trait]
impl ResultSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn deliver(&self, result: &QuizResult) -> anyhow::Result<String> {
        let path = self.path_for(result);
        let json = serde_json::to_string_pretty(result).map_err(TransferError::from)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(TransferError::from)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(TransferError::from)?;

        tracing::info!(path = %path.display(), "result saved");
        Ok(path.display().to_string())
    }
}
