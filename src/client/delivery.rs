//! Delivery Client
//!
//! The delivery client bridges the realtime channel and the Persistence
//! Gateway for one authenticated user's active session.
//!
//! # State Machine
//!
//! `Disconnected -> Connecting -> Connected -> Disconnected`. On close or
//! error the client always returns to `Disconnected`; the supervisor
//! drives the next `Connecting` attempt with bounded backoff.
//!
//! # Send Path
//!
//! A send is persisted first: only after the gateway returns the
//! generated id does the client build the message record, append it to
//! local state, and - only while `Connected` - emit a `dm` envelope over
//! the realtime channel. A gateway failure therefore never produces a
//! broadcast, and a realtime send failure never loses the persisted
//! message.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::client::conversations::ConversationStore;
use crate::client::gateway::{GatewayError, PersistenceGateway};
use crate::shared::envelope::Envelope;
use crate::shared::error::DecodeError;
use crate::shared::message::{Attachment, DirectMessage};

/// Liveness of the realtime channel from this client's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No realtime connection
    Disconnected,
    /// A connection attempt is in flight
    Connecting,
    /// The realtime channel is open
    Connected,
}

/// Realtime channel unavailable mid-send
#[derive(Debug, Error)]
#[error("realtime send failed: {message}")]
pub struct SendError {
    /// Human-readable error message
    pub message: String,
}

/// Outbound side of the realtime channel
///
/// The seam between the delivery client and the transport; tests swap in
/// an in-memory implementation.
pub trait RealtimeSender {
    /// Queue a text frame for the realtime channel
    fn send_frame(&self, frame: &str) -> Result<(), SendError>;
}

/// A `RealtimeSender` backed by an unbounded queue
///
/// The supervisor drains the queue into the socket sink, mirroring the
/// server's per-connection writer task.
#[derive(Debug, Clone)]
pub struct QueueSender {
    tx: mpsc::UnboundedSender<String>,
}

impl QueueSender {
    /// Create a sender/receiver pair
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl RealtimeSender for QueueSender {
    fn send_frame(&self, frame: &str) -> Result<(), SendError> {
        self.tx.send(frame.to_owned()).map_err(|_| SendError {
            message: "outbound queue closed".to_string(),
        })
    }
}

/// The per-session delivery client
///
/// Owns the conversation state, the gateway handle and the outbound side
/// of the realtime channel. The local user id comes from the session/auth
/// gate; it is trusted as-is on the realtime path.
pub struct DeliveryClient<G, S> {
    user_id: String,
    gateway: G,
    sender: Option<S>,
    state: ConnectionState,
    store: ConversationStore,
}

impl<G, S> DeliveryClient<G, S>
where
    G: PersistenceGateway,
    S: RealtimeSender,
{
    /// Create a disconnected client for the authenticated user `user_id`
    pub fn new(user_id: impl Into<String>, gateway: G) -> Self {
        Self {
            user_id: user_id.into(),
            gateway,
            sender: None,
            state: ConnectionState::Disconnected,
            store: ConversationStore::new(),
        }
    }

    /// The authenticated user this session belongs to
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Current realtime channel state
    pub fn connection_state(&self) -> ConnectionState {
        self.state
    }

    /// Conversation state for this session
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Mark a connection attempt in flight
    pub fn mark_connecting(&mut self) {
        self.state = ConnectionState::Connecting;
    }

    /// Attach the outbound channel of a freshly opened connection
    pub fn mark_connected(&mut self, sender: S) {
        self.sender = Some(sender);
        self.state = ConnectionState::Connected;
        tracing::info!("[Delivery] Realtime channel connected");
    }

    /// Drop the outbound channel and return to `Disconnected`
    pub fn mark_disconnected(&mut self) {
        self.sender = None;
        self.state = ConnectionState::Disconnected;
        tracing::info!("[Delivery] Realtime channel disconnected");
    }

    /// Persist a direct message, then notify peers
    ///
    /// Awaits the Persistence Gateway's durable write; on success builds
    /// the message record from the generated id, appends it to local
    /// state, and emits a `dm` envelope if the realtime channel is
    /// connected. On gateway failure nothing is emitted and the error is
    /// surfaced to the caller only.
    ///
    /// A realtime send failure degrades the channel to `Disconnected` but
    /// does not fail the call: the message is already durable.
    pub async fn send_direct_message(
        &mut self,
        receiver_id: &str,
        workspace_id: &str,
        content: &str,
    ) -> Result<DirectMessage, GatewayError> {
        let id = self
            .gateway
            .create_direct_message(&self.user_id, receiver_id, workspace_id, content)
            .await?;

        let message =
            DirectMessage::from_persisted(id, workspace_id, &self.user_id, receiver_id, content);
        self.store.apply(&self.user_id, message.clone());

        if self.state == ConnectionState::Connected {
            let envelope = Envelope::Dm(message.clone());
            match envelope.encode() {
                Ok(frame) => {
                    let send_result = self
                        .sender
                        .as_ref()
                        .map(|s| s.send_frame(&frame))
                        .unwrap_or_else(|| {
                            Err(SendError {
                                message: "no sender attached".to_string(),
                            })
                        });
                    if let Err(e) = send_result {
                        tracing::warn!("[Delivery] Notification not sent: {}", e);
                        self.mark_disconnected();
                    }
                }
                Err(e) => tracing::error!("[Delivery] Failed to encode envelope: {}", e),
            }
        }

        Ok(message)
    }

    /// Apply a frame received on the realtime channel
    ///
    /// Returns `Ok(true)` when a message was appended, `Ok(false)` when
    /// the frame decoded but produced no state change (unknown kind, or a
    /// duplicate id). A `DecodeError` means the frame was dropped; the
    /// connection stays usable.
    pub fn handle_frame(&mut self, frame: &str) -> Result<bool, DecodeError> {
        match Envelope::decode(frame)? {
            Envelope::Dm(message) => Ok(self.store.apply(&self.user_id, message)),
            Envelope::Unknown { kind } => {
                tracing::debug!("[Delivery] Ignoring frame of unknown kind '{}'", kind);
                Ok(false)
            }
        }
    }

    /// Upload attachments against a persisted message and merge them
    ///
    /// The merge is local only; it is not re-broadcast over the realtime
    /// channel, so peers see the new attachments on their next refetch.
    pub async fn attach_files(
        &mut self,
        peer: &str,
        message_id: &str,
        uploads: Vec<crate::client::gateway::AttachmentUpload>,
    ) -> Result<Vec<Attachment>, GatewayError> {
        let attachments = self
            .gateway
            .upload_attachments(message_id, &self.user_id, uploads)
            .await?;
        self.store
            .merge_attachments(peer, message_id, attachments.clone());
        Ok(attachments)
    }

    /// Refetch a conversation from the gateway and replace local state
    ///
    /// Called after a reconnect: buffered realtime state is replaced by
    /// the gateway's authoritative list. Returns the number of messages
    /// in the reconciled bucket.
    pub async fn reconcile_conversation(&mut self, peer: &str) -> Result<usize, GatewayError> {
        let fetched = self
            .gateway
            .list_messages_between(&self.user_id, peer)
            .await?;
        let count = self.store.reconcile(peer, fetched);
        tracing::info!(
            "[Delivery] Reconciled conversation with {} ({} messages)",
            peer,
            count
        );
        Ok(count)
    }
}
