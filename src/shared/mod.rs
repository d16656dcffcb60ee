//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the server and the delivery client. These types are used for
//! serialization and communication over the realtime channel and the
//! Persistence Gateway's REST API.
//!
//! # Overview
//!
//! All types here are platform-agnostic and designed for serialization.
//! Field names follow the Persistence Gateway's camelCase JSON convention
//! on the wire.

/// Direct-message and attachment data structures
pub mod message;

/// Notification envelope and text-frame codec
pub mod envelope;

/// Shared error types
pub mod error;

/// Client configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use message::{Attachment, DirectMessage};
pub use envelope::Envelope;
pub use error::DecodeError;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
