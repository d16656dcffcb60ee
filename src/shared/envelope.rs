//! Notification Envelope and Text-Frame Codec
//!
//! This module defines the tagged wire unit carried over the realtime
//! channel and the codec that converts it to and from a text frame.
//!
//! # Wire Format
//!
//! ```json
//! { "type": "dm", "message": { ...DirectMessage... } }
//! ```
//!
//! # Forward Compatibility
//!
//! A frame with an unrecognized `type` decodes successfully into
//! [`Envelope::Unknown`]; the broadcaster drops such envelopes silently
//! instead of treating them as errors. New notification kinds are added by
//! extending the enum, which forces exhaustive handling at every match
//! site.

use serde::Deserialize;

use crate::shared::error::DecodeError;
use crate::shared::message::DirectMessage;

/// Wire tag for direct-message notifications
pub const DM_KIND: &str = "dm";

/// The tagged wire unit carrying one notification kind and its payload
///
/// The envelope is purely a delivery hint: its payload always carries an
/// id already assigned by the Persistence Gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// Direct-message notification
    Dm(DirectMessage),
    /// A kind this build does not understand; decoded, never relayed
    Unknown {
        /// The `type` value the frame declared
        kind: String,
    },
}

/// Raw frame shape used for decoding
///
/// Decoding goes through this intermediate so that unknown `type` values
/// can be accepted without an error.
#[derive(Deserialize)]
struct RawFrame {
    #[serde(rename = "type")]
    kind: String,
    message: Option<serde_json::Value>,
}

impl Envelope {
    /// The wire tag of this envelope
    pub fn kind(&self) -> &str {
        match self {
            Envelope::Dm(_) => DM_KIND,
            Envelope::Unknown { kind } => kind,
        }
    }

    /// Serialize the envelope to a text frame
    ///
    /// Only kinds that originate locally can be encoded; [`Envelope::Unknown`]
    /// exists purely on the decode side and is rejected.
    pub fn encode(&self) -> Result<String, DecodeError> {
        match self {
            Envelope::Dm(message) => {
                let frame = serde_json::json!({
                    "type": DM_KIND,
                    "message": message,
                });
                serde_json::to_string(&frame).map_err(DecodeError::from)
            }
            Envelope::Unknown { kind } => Err(DecodeError::UnencodableVariant {
                kind: kind.clone(),
            }),
        }
    }

    /// Parse a text frame into an envelope
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the frame is not well-formed JSON with
    /// a string `type` field, or when a recognized `type` is present but
    /// its payload is absent or malformed. Unrecognized `type` values
    /// decode to [`Envelope::Unknown`].
    pub fn decode(frame: &str) -> Result<Self, DecodeError> {
        let raw: RawFrame = serde_json::from_str(frame)?;
        match raw.kind.as_str() {
            DM_KIND => {
                let payload = raw
                    .message
                    .ok_or_else(|| DecodeError::missing_payload(DM_KIND, "frame has no message"))?;
                let message: DirectMessage = serde_json::from_value(payload)
                    .map_err(|e| DecodeError::missing_payload(DM_KIND, e.to_string()))?;
                Ok(Envelope::Dm(message))
            }
            _ => Ok(Envelope::Unknown { kind: raw.kind }),
        }
    }
}
