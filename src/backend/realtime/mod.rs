//! Realtime Relay Module
//!
//! This module implements the realtime direct-message fan-out: the
//! connection registry, the broadcaster, and the WebSocket endpoint that
//! feeds them.
//!
//! # Architecture
//!
//! The realtime module is organized into focused submodules:
//!
//! - **`registry`** - Live set of open connections for this process
//! - **`broadcast`** - Fan-out of decoded envelopes to all-but-origin
//! - **`socket`** - WebSocket upgrade handler and per-connection tasks
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs       - Module exports and documentation
//! ├── registry.rs  - Connection registry
//! ├── broadcast.rs - Fan-out broadcaster
//! └── socket.rs    - WebSocket endpoint
//! ```
//!
//! # Connection Model
//!
//! A connection is an opaque identity with an outbound frame queue; it is
//! not bound to a user. The realtime channel is intentionally
//! unauthenticated in the current design: every open connection receives
//! every `dm` notification and clients self-filter by conversation key.
//! The registry being an explicit instance (owned by `AppState`) is the
//! seam for binding connections to identities later.
//!
//! # Ordering
//!
//! Relay happens synchronously inside the origin connection's read task,
//! and each peer drains one FIFO queue, so envelopes from one origin reach
//! a given peer in the order they were received. No ordering is guaranteed
//! across different origins.

/// Connection registry
pub mod registry;

/// Fan-out broadcasting
pub mod broadcast;

/// WebSocket endpoint
pub mod socket;

// Re-export commonly used types and functions
pub use broadcast::relay;
pub use registry::{ConnectionId, ConnectionRegistry};
pub use socket::handle_realtime_upgrade;
