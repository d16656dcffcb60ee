//! Route Configuration Module
//!
//! This module configures all HTTP routes for the relay server.
//!
//! # Route Organization
//!
//! - `GET /ws` - Realtime WebSocket upgrade point
//! - `GET /health` - Liveness probe
//! - anything else - JSON 404 via [`crate::backend::error::BackendError`]
//!
//! The REST API (auth, workspaces, messages, attachments) lives in the
//! Persistence Gateway, a separate collaborator; this server exposes
//! nothing beyond the realtime channel itself.

/// Main router creation
pub mod router;

// Re-export commonly used functions
pub use router::create_router;
