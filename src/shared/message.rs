//! Direct-Message Data Structures
//!
//! Represents a persisted direct message and its attachments, as returned
//! by the Persistence Gateway. The realtime path consumes these records
//! read-only: ids are assigned by the gateway at write time and never
//! minted here.

use serde::{Deserialize, Serialize};

/// A file attached to a direct message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Unique attachment ID (assigned by the Persistence Gateway)
    pub id: String,
    /// The direct message this attachment belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_message_id: Option<String>,
    /// User who uploaded the attachment
    pub user_id: String,
    /// Original file name
    pub name: String,
    /// Mime type (serialized as `type` on the wire)
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Download URL
    pub url: String,
    /// File size in bytes
    pub size: u64,
    /// When the file was uploaded (RFC3339 string)
    pub uploaded_at: String,
}

/// Represents a persisted direct message between two users
///
/// The `id` is globally unique and assigned by the Persistence Gateway at
/// write time. A `DirectMessage` travelling inside a realtime envelope is
/// purely a delivery hint; the gateway remains the system of record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    /// Unique message ID (assigned by the Persistence Gateway)
    pub id: String,
    /// Workspace the conversation belongs to
    pub workspace_id: String,
    /// User who sent the message
    pub sender_id: String,
    /// User who receives the message
    pub receiver_id: String,
    /// Message content
    pub content: String,
    /// Whether the message has been read by the recipient
    pub is_read: bool,
    /// When the message was sent (RFC3339 string)
    pub timestamp: String,
    /// Attachments on this message, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl DirectMessage {
    /// Create a message record from a freshly persisted send
    ///
    /// Used by the delivery client after the Persistence Gateway has
    /// acknowledged the durable write and returned the generated id.
    pub fn from_persisted(
        id: impl Into<String>,
        workspace_id: impl Into<String>,
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            workspace_id: workspace_id.into(),
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            content: content.into(),
            is_read: false,
            timestamp: chrono::Utc::now().to_rfc3339(),
            attachments: None,
        }
    }

    /// Conversation key for a client whose local user id is `me`
    ///
    /// Buckets the message under the *other* participant: the sender for
    /// inbound messages, the receiver for the client's own messages.
    pub fn conversation_key(&self, me: &str) -> &str {
        if self.sender_id == me {
            &self.receiver_id
        } else {
            &self.sender_id
        }
    }
}
