//! Typed error system for the client SDK.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Typed error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // Transport errors
    NetworkError,
    Timeout,
    ConnectionRefused,

    // Protocol errors
    HttpError,
    HttpsNotSupported,
    InvalidUrl,
    InvalidResponse,

    // GraphQL errors
    ExecutionError,
    NoData,

    // Serialization errors
    SerializeError,
    DeserializeError,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::ConnectionRefused => "CONNECTION_REFUSED",
            Self::HttpError => "HTTP_ERROR",
            Self::HttpsNotSupported => "HTTPS_NOT_SUPPORTED",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidResponse => "INVALID_RESPONSE",
            Self::ExecutionError => "EXECUTION_ERROR",
            Self::NoData => "NO_DATA",
            Self::SerializeError => "SERIALIZE_ERROR",
            Self::DeserializeError => "DESERIALIZE_ERROR",
        }
    }

    /// True if a caller could reasonably retry the request.
    ///
    /// Execution errors are never retryable: the server evaluated the
    /// operation and rejected it.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::ConnectionRefused
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An SDK error: a typed code plus a human-readable message.
#[derive(Error, Debug, Clone)]
#[error("[{code}] {message}")]
pub struct SdkError {
    pub code: ErrorCode,
    pub message: String,
}

impl SdkError {
    /// Creates a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkError, message)
    }

    /// Creates a timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorCode::Timeout, "Request timed out")
    }

    /// Creates a serialization error.
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializeError, message)
    }

    /// Creates a deserialization error.
    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DeserializeError, message)
    }

    /// True if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

/// Type alias for SDK results.
pub type SdkResult<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryability_classification() {
        assert!(ErrorCode::Timeout.is_retryable());
        assert!(ErrorCode::NetworkError.is_retryable());
        assert!(!ErrorCode::ExecutionError.is_retryable());
        assert!(!ErrorCode::DeserializeError.is_retryable());
    }

    #[test]
    fn error_display_includes_code_and_message() {
        let err = SdkError::new(ErrorCode::NoData, "No data in response");
        assert_eq!(err.to_string(), "[NO_DATA] No data in response");
    }

    #[test]
    fn error_code_serializes_as_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::ExecutionError).unwrap();
        assert_eq!(json, "\"EXECUTION_ERROR\"");
    }
}
