//! Shared Error Types
//!
//! This module defines error types that are shared between the server and
//! the delivery client. They cover the wire codec; every failure here is
//! isolated to the single frame that produced it.
//!
//! # Policy
//!
//! A `DecodeError` never crashes a connection: the offending frame is
//! dropped, logged, and the read loop continues.
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across task
//! boundaries.

use thiserror::Error;

/// Errors produced by the envelope codec
#[derive(Debug, Error, Clone)]
pub enum DecodeError {
    /// The frame is not well-formed JSON or lacks a string `type` field
    #[error("malformed frame: {message}")]
    MalformedFrame {
        /// Human-readable error message
        message: String,
    },

    /// A recognized `type` was present but its payload was absent or
    /// failed to parse
    #[error("missing or invalid payload for kind '{kind}': {message}")]
    MissingPayload {
        /// The envelope kind the frame declared
        kind: String,
        /// Human-readable error message
        message: String,
    },

    /// Attempted to encode a variant that only exists on the decode side
    #[error("envelope kind '{kind}' cannot be encoded")]
    UnencodableVariant {
        /// The envelope kind that was rejected
        kind: String,
    },
}

impl DecodeError {
    /// Create a new malformed-frame error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedFrame {
            message: message.into(),
        }
    }

    /// Create a new missing-payload error
    pub fn missing_payload(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingPayload {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}
