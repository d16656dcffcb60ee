/**
 * Fan-out Broadcasting
 *
 * The core protocol action: on receiving a decoded envelope from one
 * connection, relay the identical envelope to every other open connection
 * in the registry.
 *
 * # Policy
 *
 * Only `dm` envelopes trigger a relay. Envelopes of any other kind were
 * accepted by the codec for forward compatibility and are dropped here
 * silently. Delivery is best-effort, at-most-once per currently-open peer
 * connection: a peer that is closing or errors mid-send is skipped, with
 * no retry, no buffering, and no error surfaced to the origin.
 */

use crate::backend::realtime::registry::{ConnectionId, ConnectionRegistry};
use crate::shared::Envelope;

/// Relay a decoded envelope from `origin` to all other open connections
///
/// # Arguments
///
/// * `registry` - The connection registry to fan out over
/// * `origin` - The connection the envelope arrived on (never echoed to)
/// * `envelope` - The decoded envelope
///
/// # Returns
///
/// Number of peer connections the envelope was queued for (0 when the
/// envelope kind does not relay or no peers are connected)
pub fn relay(registry: &ConnectionRegistry, origin: ConnectionId, envelope: &Envelope) -> usize {
    match envelope {
        Envelope::Dm(_) => {
            let frame = match envelope.encode() {
                Ok(frame) => frame,
                Err(e) => {
                    // Should not occur for a Dm envelope that just decoded
                    tracing::error!("[Realtime] Failed to re-encode envelope: {}", e);
                    return 0;
                }
            };
            let delivered = registry.fan_out(origin, &frame);
            tracing::info!(
                "[Realtime] Relayed dm from {} to {} peer(s)",
                origin,
                delivered
            );
            delivered
        }
        Envelope::Unknown { kind } => {
            tracing::debug!("[Realtime] Ignoring envelope of unknown kind '{}'", kind);
            0
        }
    }
}
