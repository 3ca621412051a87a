//! Where questions come from and where results go.
//!
//! Implements the `QuestionSource` and `ResultSink` traits for local files,
//! HTTP endpoints, and in-memory fixtures, plus the `tfquiz.toml` config layer.

pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod memory;
pub mod webhook;

pub use config::{load_config, load_config_from, source_from_location, QuizConfig, WebhookConfig};
pub use error::TransferError;
pub use file::{FileSink, FileSource};
pub use http::HttpSource;
pub use memory::{MemorySink, StaticSource};
pub use webhook::WebhookSink;
