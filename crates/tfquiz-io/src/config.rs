//! Quiz configuration and source/sink factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tfquiz_core::loader::LoadOptions;
use tfquiz_core::traits::QuestionSource;

use crate::file::FileSource;
use crate::http::HttpSource;
use crate::webhook::WebhookSink;

/// Where to submit finished results.
///
/// Note: Custom Debug impl masks header values, which usually carry tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked: HashMap<&str, &str> = self
            .headers
            .keys()
            .map(|k| (k.as_str(), "***"))
            .collect();
        f.debug_struct("WebhookConfig")
            .field("url", &self.url)
            .field("headers", &masked)
            .finish()
    }
}

/// Top-level tfquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Question file path or `http(s)://` URL.
    #[serde(default = "default_questions")]
    pub questions: String,
    /// Directory results are saved to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Result formats to save: "json", "html".
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    /// Treat records without an `answer` as `false` instead of rejecting them.
    #[serde(default)]
    pub coerce_missing_answer: bool,
    /// Optional result submission endpoint.
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

fn default_questions() -> String {
    "questions.json".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quiz-results")
}
fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            output_dir: default_output_dir(),
            formats: default_formats(),
            coerce_missing_answer: false,
            webhook: None,
        }
    }
}

impl QuizConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            coerce_missing_answer: self.coerce_missing_answer,
        }
    }

    /// Build the webhook sink, if one is configured.
    pub fn webhook_sink(&self) -> Result<Option<WebhookSink>> {
        self.webhook
            .as_ref()
            .map(|w| WebhookSink::new(&w.url, w.headers.clone()))
            .transpose()
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substitute `${VAR}` references. Substituted values are not rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_webhook_config(config: &WebhookConfig) -> WebhookConfig {
    WebhookConfig {
        url: resolve_env_vars(&config.url),
        headers: config
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), resolve_env_vars(v)))
            .collect(),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `tfquiz.toml` in the current directory
/// 2. `~/.config/tfquiz/config.toml`
///
/// Environment variable overrides: `TFQUIZ_QUESTIONS`, `TFQUIZ_WEBHOOK_URL`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("tfquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuizConfig::default(),
    };

    // Apply env var overrides
    if let Ok(questions) = std::env::var("TFQUIZ_QUESTIONS") {
        config.questions = questions;
    }

    if let Ok(url) = std::env::var("TFQUIZ_WEBHOOK_URL") {
        match config.webhook.as_mut() {
            Some(webhook) => webhook.url = url,
            None => {
                config.webhook = Some(WebhookConfig {
                    url,
                    headers: HashMap::new(),
                })
            }
        }
    }

    config.questions = resolve_env_vars(&config.questions);
    config.webhook = config.webhook.as_ref().map(resolve_webhook_config);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("tfquiz"))
}

/// Pick a question source for a path or URL.
pub fn source_from_location(location: &str) -> Result<Box<dyn QuestionSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}
