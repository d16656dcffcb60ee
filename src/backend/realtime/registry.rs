/**
 * Connection Registry
 *
 * Tracks the set of currently open realtime connections for this server
 * process. Each entry maps an opaque connection id to the outbound frame
 * queue drained by that connection's writer task.
 *
 * # Ownership
 *
 * The registry holds a non-owning handle to each connection: closing is
 * driven by the transport layer, which unregisters the entry when the
 * socket goes away. A peer whose queue is already closed when a relay
 * reaches it is skipped; the pending unregister will clean it up.
 *
 * # Locking
 *
 * Membership lives behind a `std::sync::Mutex` that is only held for the
 * duration of a map operation and never across an await point.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

/// Opaque identity of one open realtime connection
pub type ConnectionId = Uuid;

/// The live set of open connections for this process
///
/// Cloneable handle; all clones share the same membership. There is no
/// deduplication key: a user with two open tabs yields two independent
/// entries.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<ConnectionId, mpsc::UnboundedSender<String>>>>,
}

impl ConnectionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a newly opened connection
    pub fn register(&self, id: ConnectionId, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.lock().unwrap();
        connections.insert(id, sender);
    }

    /// Remove a connection
    ///
    /// Idempotent: unregistering an id that is already absent is a no-op.
    pub fn unregister(&self, id: ConnectionId) {
        let mut connections = self.connections.lock().unwrap();
        connections.remove(&id);
    }

    /// Queue a frame for every registered connection except `origin`
    ///
    /// Best-effort: a peer whose queue is closed (its writer task already
    /// exited) is skipped without retry and without surfacing an error to
    /// the origin. Returns the number of peers the frame was queued for.
    pub fn fan_out(&self, origin: ConnectionId, frame: &str) -> usize {
        let connections = self.connections.lock().unwrap();
        let mut delivered = 0;
        for (id, sender) in connections.iter() {
            if *id == origin {
                continue;
            }
            if sender.send(frame.to_owned()).is_ok() {
                delivered += 1;
            } else {
                tracing::debug!("[Realtime] Peer {} gone mid-relay, skipping", id);
            }
        }
        delivered
    }

    /// Number of currently registered connections
    pub fn len(&self) -> usize {
        self.connections.lock().unwrap().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.connections.lock().unwrap().is_empty()
    }

    /// Whether a connection is currently registered
    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.lock().unwrap().contains_key(&id)
    }
}
