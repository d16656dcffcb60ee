//! Conversation State Store
//!
//! In-memory conversation state for one authenticated session. Messages
//! are bucketed by conversation key: the *other* participant's user id.
//!
//! # Deduplication
//!
//! Every append dedupes by persisted message id. The happy path delivers
//! each envelope exactly once per peer, but a reconnect-and-replay can
//! present the same message twice; the id check keeps the bucket clean.
//!
//! # Attachments
//!
//! Attachment uploads complete against an already-persisted message id;
//! the returned records are merged into that message's attachment list by
//! id. Attachment merges are not re-broadcast over the realtime channel,
//! so peers converge on the next reconciliation refetch.

use std::collections::HashMap;

use crate::shared::{Attachment, DirectMessage};

/// Conversation state for one session, keyed by peer user id
#[derive(Debug, Default)]
pub struct ConversationStore {
    buckets: HashMap<String, Vec<DirectMessage>>,
}

impl ConversationStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an inbound or locally-sent message for the user `me`
    ///
    /// Computes the conversation key against `me` and appends the message
    /// to that bucket. Returns `false` when a message with the same id is
    /// already present (the append is skipped).
    pub fn apply(&mut self, me: &str, message: DirectMessage) -> bool {
        let key = message.conversation_key(me).to_string();
        let bucket = self.buckets.entry(key).or_default();
        if bucket.iter().any(|m| m.id == message.id) {
            tracing::debug!(
                "[Delivery] Skipping duplicate message {} for conversation",
                message.id
            );
            return false;
        }
        bucket.push(message);
        true
    }

    /// Merge uploaded attachment records into a message by id
    ///
    /// Attachments already present on the message (same id) are left
    /// untouched. Returns `false` when no message with `message_id` exists
    /// in the `peer` bucket.
    pub fn merge_attachments(
        &mut self,
        peer: &str,
        message_id: &str,
        attachments: Vec<Attachment>,
    ) -> bool {
        let Some(bucket) = self.buckets.get_mut(peer) else {
            return false;
        };
        let Some(message) = bucket.iter_mut().find(|m| m.id == message_id) else {
            return false;
        };
        let existing = message.attachments.get_or_insert_with(Vec::new);
        for attachment in attachments {
            if !existing.iter().any(|a| a.id == attachment.id) {
                existing.push(attachment);
            }
        }
        true
    }

    /// Replace a conversation bucket with a freshly fetched message list
    ///
    /// Used after a reconnect: the Persistence Gateway's list is the
    /// system of record, so buffered realtime state is discarded in its
    /// favor. The fetched list is deduped by id, preserving fetch order.
    pub fn reconcile(&mut self, peer: &str, fetched: Vec<DirectMessage>) -> usize {
        let mut seen = std::collections::HashSet::new();
        let deduped: Vec<DirectMessage> = fetched
            .into_iter()
            .filter(|m| seen.insert(m.id.clone()))
            .collect();
        let count = deduped.len();
        self.buckets.insert(peer.to_string(), deduped);
        count
    }

    /// Messages in the conversation with `peer`, in arrival order
    pub fn messages_with(&self, peer: &str) -> &[DirectMessage] {
        self.buckets.get(peer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Peer user ids with at least one buffered message
    pub fn conversation_keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Whether no conversation has any buffered message
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}
