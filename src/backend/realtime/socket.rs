/**
 * WebSocket Endpoint
 *
 * Implements the single realtime upgrade point (`GET /ws`). Any connection
 * is accepted with no handshake payload and no authentication token; the
 * connection's identity is an opaque id minted at upgrade time.
 *
 * # Connection Lifecycle
 *
 * 1. Mint a connection id and register an outbound frame queue
 * 2. Spawn a writer task draining the queue into the socket sink
 * 3. Read loop: decode text frames and relay them; drop malformed frames
 *    without closing the connection
 * 4. On close or error, unregister and stop the writer
 *
 * # Error Handling
 *
 * A malformed frame is logged and dropped; the connection stays open.
 * A socket error ends only this connection. Relays already queued for a
 * closing connection are best-effort and simply no-op.
 */

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::realtime::broadcast::relay;
use crate::backend::realtime::registry::{ConnectionId, ConnectionRegistry};
use crate::shared::Envelope;

/// Handle the realtime upgrade (GET /ws)
///
/// Accepts the WebSocket handshake and hands the socket to the
/// per-connection task. The registry arrives via state extraction from
/// the composition root; there is no ambient singleton.
pub async fn handle_realtime_upgrade(
    State(registry): State<ConnectionRegistry>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

/// Drive one realtime connection until it closes
async fn handle_socket(socket: WebSocket, registry: ConnectionRegistry) {
    let connection_id: ConnectionId = Uuid::new_v4();
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    registry.register(connection_id, tx);
    tracing::info!(
        "[Realtime] Connection {} opened ({} live)",
        connection_id,
        registry.len()
    );

    // Writer task: drains the outbound queue in FIFO order, which is what
    // preserves per-origin relay ordering at this peer.
    let writer = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sink.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(frame)) => match Envelope::decode(frame.as_str()) {
                Ok(envelope) => {
                    relay(&registry, connection_id, &envelope);
                }
                Err(e) => {
                    tracing::warn!(
                        "[Realtime] Dropping malformed frame from {}: {}",
                        connection_id,
                        e
                    );
                }
            },
            Ok(Message::Close(_)) => break,
            // Binary, ping and pong frames are not part of the protocol
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("[Realtime] Connection {} errored: {}", connection_id, e);
                break;
            }
        }
    }

    registry.unregister(connection_id);
    writer.abort();
    tracing::info!(
        "[Realtime] Connection {} closed ({} live)",
        connection_id,
        registry.len()
    );
}
