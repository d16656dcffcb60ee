//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests: an in-memory Persistence
//! Gateway double, recording realtime senders, and frame builders.
//!
//! Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use huddle::client::gateway::{AttachmentUpload, GatewayError, PersistenceGateway};
use huddle::client::{RealtimeSender, SendError};
use huddle::shared::{Attachment, DirectMessage};

/// In-memory Persistence Gateway double
///
/// Mints sequential message ids (`m1`, `m2`, ...) and records every
/// create call. Set `fail_create` to simulate a rejected durable write.
#[derive(Default)]
pub struct MockGateway {
    /// When true, `create_direct_message` fails with a 500
    pub fail_create: bool,
    /// Messages returned by `list_messages_between`
    pub history: Mutex<Vec<DirectMessage>>,
    /// Attachments returned by `upload_attachments`
    pub upload_result: Mutex<Vec<Attachment>>,
    /// Recorded (sender, receiver, workspace, content) create calls
    pub created: Mutex<Vec<(String, String, String, String)>>,
    next_id: AtomicU32,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn with_history(history: Vec<DirectMessage>) -> Self {
        Self {
            history: Mutex::new(history),
            ..Self::default()
        }
    }
}

impl PersistenceGateway for MockGateway {
    async fn create_direct_message(
        &self,
        sender_id: &str,
        receiver_id: &str,
        workspace_id: &str,
        content: &str,
    ) -> Result<String, GatewayError> {
        if self.fail_create {
            return Err(GatewayError::Status { status: 500 });
        }
        self.created.lock().unwrap().push((
            sender_id.to_string(),
            receiver_id.to_string(),
            workspace_id.to_string(),
            content.to_string(),
        ));
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("m{}", n))
    }

    async fn list_messages_between(
        &self,
        _user_a: &str,
        _user_b: &str,
    ) -> Result<Vec<DirectMessage>, GatewayError> {
        Ok(self.history.lock().unwrap().clone())
    }

    async fn upload_attachments(
        &self,
        _message_id: &str,
        _user_id: &str,
        _uploads: Vec<AttachmentUpload>,
    ) -> Result<Vec<Attachment>, GatewayError> {
        Ok(self.upload_result.lock().unwrap().clone())
    }
}

/// A realtime sender that records every frame it is handed
#[derive(Debug, Clone, Default)]
pub struct RecordingSender {
    pub frames: Arc<Mutex<Vec<String>>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_frames(&self) -> Vec<String> {
        self.frames.lock().unwrap().clone()
    }
}

impl RealtimeSender for RecordingSender {
    fn send_frame(&self, frame: &str) -> Result<(), SendError> {
        self.frames.lock().unwrap().push(frame.to_owned());
        Ok(())
    }
}

/// A realtime sender whose channel is already gone
#[derive(Debug, Clone, Default)]
pub struct FailingSender;

impl RealtimeSender for FailingSender {
    fn send_frame(&self, _frame: &str) -> Result<(), SendError> {
        Err(SendError {
            message: "channel closed".to_string(),
        })
    }
}

/// Build a direct message record for tests
pub fn dm(id: &str, sender: &str, receiver: &str, content: &str) -> DirectMessage {
    DirectMessage::from_persisted(id, "w1", sender, receiver, content)
}

/// Build a well-formed `dm` frame for tests
pub fn dm_frame(id: &str, sender: &str, receiver: &str, content: &str) -> String {
    huddle::shared::Envelope::Dm(dm(id, sender, receiver, content))
        .encode()
        .unwrap()
}

/// Build an attachment record for tests
pub fn attachment(id: &str, message_id: &str) -> Attachment {
    Attachment {
        id: id.to_string(),
        direct_message_id: Some(message_id.to_string()),
        user_id: "u1".to_string(),
        name: format!("{}.txt", id),
        mime_type: "text/plain".to_string(),
        url: format!("/files/{}", id),
        size: 42,
        uploaded_at: "2025-01-01T00:00:00Z".to_string(),
    }
}
