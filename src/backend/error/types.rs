/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP
 * responses.
 *
 * # Error Categories
 *
 * - Handler errors: invalid requests reaching the HTTP surface
 * - Decode errors: malformed realtime frames (wrapped from the shared
 *   codec; policy is drop-the-frame, so these rarely become responses)
 * - Serialization errors: JSON encoding failures in response bodies
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::DecodeError;

/// Backend-specific error types
///
/// Each variant carries enough context to produce an HTTP response. No
/// variant is fatal to the server process.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid request)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Malformed realtime frame
    #[error(transparent)]
    DecodeError(#[from] DecodeError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DecodeError(_) => StatusCode::BAD_REQUEST,
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DecodeError(err) => err.to_string(),
            Self::SerializationError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        let handler_error = BackendError::handler(StatusCode::UNAUTHORIZED, "Unauthorized");
        assert_eq!(handler_error.status_code(), StatusCode::UNAUTHORIZED);

        let decode_error: BackendError = DecodeError::malformed("bad frame").into();
        assert_eq!(decode_error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_from_decode_error() {
        let decode_error = DecodeError::missing_payload("dm", "no message");
        let backend_error: BackendError = decode_error.into();
        assert!(backend_error.message().contains("dm"));
    }
}
