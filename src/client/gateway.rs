//! Persistence Gateway
//!
//! The Persistence Gateway is the durable store for direct messages and
//! attachments, exposed by the REST backend. The realtime core consumes
//! it through the [`PersistenceGateway`] trait; the trait is the seam
//! that keeps the delivery client testable without a live backend.
//!
//! # Endpoints
//!
//! The HTTP implementation targets the backend's REST surface:
//!
//! - `POST /api/messages/dm` - create a direct message, returns the
//!   generated id
//! - `GET /api/messages/between/{a}/{b}` - ordered message history,
//!   ascending by timestamp
//! - `POST /api/attachments/direct/{id}/attachments` - multipart upload
//!   against an existing message id
//!
//! # Timeouts
//!
//! The core applies no timeout of its own; callers set their policy on
//! the `reqwest` client they pass in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::{Attachment, DirectMessage};

/// Errors from the Persistence Gateway boundary
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-success status
    #[error("gateway returned status {status}")]
    Status {
        /// HTTP status code of the response
        status: u16,
    },

    /// The response body did not have the expected shape
    #[error("unexpected gateway response: {message}")]
    Body {
        /// Human-readable error message
        message: String,
    },
}

/// A file to upload as an attachment
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    /// Original file name
    pub file_name: String,
    /// Mime type of the file
    pub mime_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

/// Durable store for direct messages, consumed by the delivery client
///
/// Implementations must not emit anything on the realtime channel; the
/// delivery client owns the persist-then-notify ordering.
pub trait PersistenceGateway {
    /// Create a direct message; returns the generated message id
    fn create_direct_message(
        &self,
        sender_id: &str,
        receiver_id: &str,
        workspace_id: &str,
        content: &str,
    ) -> impl std::future::Future<Output = Result<String, GatewayError>> + Send;

    /// Message history between two users, ascending by timestamp
    fn list_messages_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> impl std::future::Future<Output = Result<Vec<DirectMessage>, GatewayError>> + Send;

    /// Upload attachments against an existing message id
    fn upload_attachments(
        &self,
        message_id: &str,
        user_id: &str,
        uploads: Vec<AttachmentUpload>,
    ) -> impl std::future::Future<Output = Result<Vec<Attachment>, GatewayError>> + Send;
}

/// Request body for `POST /api/messages/dm`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDmRequest<'a> {
    workspace_id: &'a str,
    sender_id: &'a str,
    receiver_id: &'a str,
    content: &'a str,
}

/// Response body for `POST /api/messages/dm`
#[derive(Debug, Deserialize)]
struct CreateDmResponse {
    /// The generated message id
    data: String,
}

/// Response body for the attachment upload endpoint
#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadData,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    #[serde(default)]
    attachments: Vec<Attachment>,
}

/// HTTP implementation of the Persistence Gateway
#[derive(Debug, Clone)]
pub struct HttpPersistenceGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPersistenceGateway {
    /// Create a gateway client against a base URL
    ///
    /// `base_url` should not end with a slash, e.g.
    /// `http://localhost:5000`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl PersistenceGateway for HttpPersistenceGateway {
    async fn create_direct_message(
        &self,
        sender_id: &str,
        receiver_id: &str,
        workspace_id: &str,
        content: &str,
    ) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.url("/api/messages/dm"))
            .json(&CreateDmRequest {
                workspace_id,
                sender_id,
                receiver_id,
                content,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: CreateDmResponse = response.json().await.map_err(|e| GatewayError::Body {
            message: e.to_string(),
        })?;
        Ok(body.data)
    }

    async fn list_messages_between(
        &self,
        user_a: &str,
        user_b: &str,
    ) -> Result<Vec<DirectMessage>, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("/api/messages/between/{}/{}", user_a, user_b)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Status {
                status: response.status().as_u16(),
            });
        }

        response.json().await.map_err(|e| GatewayError::Body {
            message: e.to_string(),
        })
    }

    async fn upload_attachments(
        &self,
        message_id: &str,
        user_id: &str,
        uploads: Vec<AttachmentUpload>,
    ) -> Result<Vec<Attachment>, GatewayError> {
        let mut form = reqwest::multipart::Form::new().text("userId", user_id.to_string());
        for upload in uploads {
            let part = reqwest::multipart::Part::bytes(upload.bytes)
                .file_name(upload.file_name)
                .mime_str(&upload.mime_type)
                .map_err(|e| GatewayError::Body {
                    message: e.to_string(),
                })?;
            form = form.part("attachments", part);
        }

        let response = self
            .client
            .post(self.url(&format!(
                "/api/attachments/direct/{}/attachments",
                message_id
            )))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: UploadResponse = response.json().await.map_err(|e| GatewayError::Body {
            message: e.to_string(),
        })?;
        Ok(body.data.attachments)
    }
}
