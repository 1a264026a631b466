//! Error types for gridlink-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum CoreError {
    /// Payload line that is not a recognized message. Never surfaced to the user.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Server answered with HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("Update rejected with HTTP status {status}")]
    UpdateRejected { status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Decoder already running")]
    AlreadyRunning,
}

impl CoreError {
    /// True for failures that should flip the stream to `Disconnected` and retry.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            CoreError::Http(_) | CoreError::Connection(_) | CoreError::HttpStatus { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::AlreadyRunning;
        assert_eq!(err.to_string(), "Decoder already running");
    }

    #[test]
    fn test_parse_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{x: 1").unwrap_err();
        let core_err: CoreError = json_err.into();
        assert!(matches!(core_err, CoreError::Parse(_)));
        assert!(!core_err.is_connection_failure());
    }

    #[test]
    fn test_http_status_error() {
        let err = CoreError::HttpStatus { status: 503 };
        assert_eq!(err.to_string(), "Server answered with HTTP status 503");
        assert!(err.is_connection_failure());
    }

    #[test]
    fn test_update_rejected_is_not_connection_failure() {
        let err = CoreError::UpdateRejected { status: 500 };
        assert_eq!(err.to_string(), "Update rejected with HTTP status 500");
        assert!(!err.is_connection_failure());
    }
}
