//! Backend Module
//!
//! This module contains all server-side code for the Huddle realtime
//! relay. It provides an Axum HTTP server whose single job is accepting
//! realtime connections and fanning direct-message notifications out to
//! every other open connection.
//!
//! # Overview
//!
//! The backend module includes:
//! - Axum HTTP server setup and configuration
//! - The `/ws` WebSocket upgrade point
//! - Connection registry and fan-out broadcasting
//! - Route configuration
//! - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── realtime/       - Registry, broadcaster, socket handling
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! The backend holds a single piece of shared mutable state: the
//! [`realtime::ConnectionRegistry`], owned by `AppState` and wired in at
//! the composition root (`server::init::create_app`). It is never a
//! process-wide singleton; handlers receive it through Axum state
//! extraction, which keeps it testable and leaves a seam for a future
//! multi-instance backplane.
//!
//! # Delivery Semantics
//!
//! The relay is a pure fan-out with no persisted state of its own:
//! best-effort, at-most-once per open peer connection, per-origin ordering
//! preserved, no echo back to the origin. Every failure is isolated to the
//! single connection or send attempt that produced it; no error here is
//! fatal to the server process.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Realtime registry, broadcaster and socket handling
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use realtime::{ConnectionRegistry, relay};
pub use server::init::create_app;
