//! Error types for On This Day core operations.
//!
//! Every failure a fetch can produce maps onto one of three terminal kinds:
//! the transport failed, the remote answered with an error status, or the
//! payload did not have the expected shape. The CLI layer maps these to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for On This Day operations.
pub type Result<T> = std::result::Result<T, OnThisDayError>;

/// Core error type for On This Day operations.
///
/// `Clone` so that callers joined onto the same in-flight fetch can all
/// receive the same outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OnThisDayError {
    /// Transport or connectivity failure (no response received)
    #[error("Network error: {0}")]
    Network(String),

    /// The remote service answered with a status code >= 400
    #[error("Bad response: HTTP {status}")]
    BadResponse { status: u16 },

    /// The payload did not match the expected shape
    #[error("Malformed payload: {0}")]
    Decode(String),

    /// Invalid user input (unparseable date, unknown category)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The session was shut down while the fetch was in flight
    #[error("Fetch cancelled: session closed")]
    Cancelled,
}

impl OnThisDayError {
    /// HTTP status carried by a `BadResponse`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            OnThisDayError::BadResponse { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for OnThisDayError {
    fn from(err: serde_json::Error) -> Self {
        OnThisDayError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for OnThisDayError {
    fn from(err: reqwest::Error) -> Self {
        OnThisDayError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_on_bad_response() {
        assert_eq!(OnThisDayError::BadResponse { status: 503 }.status(), Some(503));
        assert_eq!(OnThisDayError::Network("down".into()).status(), None);
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(OnThisDayError::from(err), OnThisDayError::Decode(_)));
    }

    #[test]
    fn test_display_includes_status() {
        let err = OnThisDayError::BadResponse { status: 404 };
        assert_eq!(err.to_string(), "Bad response: HTTP 404");
    }
}
