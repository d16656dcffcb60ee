//! Delivery Client Module
//!
//! This module implements the per-session delivery client: the component
//! pairing one realtime connection with one authenticated user's
//! conversation state.
//!
//! # Overview
//!
//! The client module includes:
//! - Conversation state keyed by peer user id (bucketing, dedupe,
//!   attachment merge, reconciliation)
//! - The Persistence Gateway trait and its HTTP implementation
//! - The delivery state machine (persist first, notify second)
//! - Reconnect supervision with bounded exponential backoff
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs           - Module exports and documentation
//! ├── conversations.rs - Conversation state store
//! ├── gateway.rs       - Persistence Gateway trait + HTTP impl
//! ├── delivery.rs      - Delivery client state machine
//! └── supervisor.rs    - Reconnect supervision and realtime connector
//! ```
//!
//! # The Load-Bearing Ordering
//!
//! A realtime notification is only emitted after the Persistence Gateway
//! has acknowledged the durable write and returned the generated message
//! id. Emitting earlier could show peers a message whose id does not yet
//! exist if the write later fails.

/// Conversation state store
pub mod conversations;

/// Persistence Gateway trait and HTTP implementation
pub mod gateway;

/// Delivery client state machine
pub mod delivery;

/// Reconnect supervision
pub mod supervisor;

// Re-export commonly used types
pub use conversations::ConversationStore;
pub use delivery::{ConnectionState, DeliveryClient, QueueSender, RealtimeSender, SendError};
pub use gateway::{AttachmentUpload, GatewayError, HttpPersistenceGateway, PersistenceGateway};
pub use supervisor::{run_supervised, ReconnectPolicy};
