//! Reconnect Supervision
//!
//! Wraps the realtime connection lifecycle in a supervised loop: connect,
//! pump frames, and on any drop retry with bounded exponential backoff.
//! After a reconnect the open conversation is reconciled by refetching
//! from the Persistence Gateway rather than trusting buffered realtime
//! state; duplicate suppression happens by persisted message id in the
//! conversation store.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::client::delivery::{DeliveryClient, QueueSender};
use crate::client::gateway::PersistenceGateway;
use crate::shared::config::ClientConfig;

/// Bounded exponential backoff between reconnect attempts
///
/// The delay doubles from `base` up to `max`; a successful connect resets
/// the sequence.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    base: Duration,
    max: Duration,
    attempt: u32,
}

impl ReconnectPolicy {
    /// Create a policy with the given bounds
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            attempt: 0,
        }
    }

    /// Policy from a client configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.backoff_base, config.backoff_max)
    }

    /// Delay before the next attempt; advances the attempt counter
    pub fn next_delay(&mut self) -> Duration {
        let factor = 2u32.saturating_pow(self.attempt);
        let delay = self.base.saturating_mul(factor).min(self.max);
        self.attempt = self.attempt.saturating_add(1);
        delay
    }

    /// Reset after a successful connect
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Number of attempts since the last reset
    pub fn attempts(&self) -> u32 {
        self.attempt
    }
}

/// Supervise one delivery client's realtime connection
///
/// Runs until cancelled (select on it or spawn and abort). Each
/// iteration: dial the realtime endpoint, attach the outbound queue,
/// reconcile `active_peer` if this is a reconnect, then pump frames in
/// both directions until the socket drops. Every exit path returns the
/// client to `Disconnected` and sleeps the backoff delay before the next
/// attempt.
pub async fn run_supervised<G>(
    client: &mut DeliveryClient<G, QueueSender>,
    config: &ClientConfig,
    active_peer: Option<&str>,
) where
    G: PersistenceGateway,
{
    let mut policy = ReconnectPolicy::from_config(config);
    let mut reconnected = false;

    loop {
        client.mark_connecting();
        let socket = match connect_async(config.realtime_url.as_str()).await {
            Ok((socket, _response)) => socket,
            Err(e) => {
                client.mark_disconnected();
                let delay = policy.next_delay();
                tracing::warn!(
                    "[Delivery] Connect to {} failed ({}), retrying in {:?}",
                    config.realtime_url,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                continue;
            }
        };

        policy.reset();
        let (mut sink, mut stream) = socket.split();
        let (sender, mut outbound) = QueueSender::channel();
        client.mark_connected(sender);

        // After a drop, the view must converge on server state: refetch
        // instead of trusting whatever the old connection buffered.
        if reconnected {
            if let Some(peer) = active_peer {
                if let Err(e) = client.reconcile_conversation(peer).await {
                    tracing::warn!("[Delivery] Reconciliation with {} failed: {}", peer, e);
                }
            }
        }
        reconnected = true;

        loop {
            tokio::select! {
                frame = outbound.recv() => {
                    match frame {
                        Some(frame) => {
                            if sink.send(Message::text(frame)).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                inbound = stream.next() => {
                    match inbound {
                        Some(Ok(Message::Text(frame))) => {
                            if let Err(e) = client.handle_frame(frame.as_str()) {
                                tracing::warn!("[Delivery] Dropping malformed frame: {}", e);
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => break,
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::debug!("[Delivery] Realtime channel errored: {}", e);
                            break;
                        }
                    }
                }
            }
        }

        client.mark_disconnected();
        let delay = policy.next_delay();
        tracing::info!("[Delivery] Realtime channel dropped, retrying in {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}
