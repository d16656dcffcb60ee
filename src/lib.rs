//! Huddle - Realtime Direct-Message Fan-out
//!
//! Huddle is the realtime delivery subsystem of a team-chat application.
//! It relays direct-message notifications between live client connections
//! with low latency, independently of the REST/database path used for
//! persistence and history retrieval.
//!
//! # Overview
//!
//! The crate provides:
//! - A process-local connection registry and fan-out broadcaster
//! - A tagged-union wire envelope with a text-frame codec
//! - An axum WebSocket endpoint accepting realtime connections
//! - A per-session delivery client that persists a message through the
//!   Persistence Gateway before notifying peers, and reconciles local
//!   conversation state on reconnect
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types shared between server and client
//!   - Direct-message and attachment wire records
//!   - The notification envelope and its codec
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with the `/ws` upgrade point
//!   - Connection registry and fan-out broadcaster
//!   - Application state and route configuration
//!
//! - **`client`** - Delivery client for one authenticated session
//!   - Conversation state (bucketing, dedupe, attachment merge)
//!   - Persistence Gateway trait and HTTP implementation
//!   - Reconnect supervision with bounded backoff
//!
//! # Delivery Semantics
//!
//! Delivery is best-effort, at-most-once per currently-open peer
//! connection. Per-origin ordering is preserved; no ordering guarantee
//! exists across different senders. The envelope is a delivery hint, never
//! the system of record: message ids are minted by the Persistence Gateway
//! at write time, and a notification is only emitted after the durable
//! write is acknowledged.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;

/// Delivery client for one authenticated session
pub mod client;
