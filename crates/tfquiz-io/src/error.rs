//! Transfer error types.

use thiserror::Error;

/// Errors that can occur while fetching questions or delivering results.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The remote end answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The remote end could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// A local file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The result could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_convert_to_serialize() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TransferError::from(json_err);
        assert!(matches!(err, TransferError::Serialize(_)));
        assert!(err.to_string().starts_with("serialization error:"));
    }

    #[test]
    fn http_error_shows_status() {
        let err = TransferError::Http {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: down");
    }
}
