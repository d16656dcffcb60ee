/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container. The connection registry is
 * its only shared mutable resource: it is created once at the composition
 * root and handed to handlers by reference through state extraction,
 * never reached through a process-wide singleton. That keeps the registry
 * testable and leaves a seam for a future multi-instance backplane.
 *
 * # Thread Safety
 *
 * `ConnectionRegistry` is a cloneable handle over `Arc<Mutex<..>>`; all
 * clones share membership and the lock is never held across an await.
 */

use axum::extract::FromRef;

use crate::backend::realtime::ConnectionRegistry;

/// Application state for the relay server
///
/// This struct serves as the central state container for the Axum
/// application. `FromRef` implementations let handlers extract the parts
/// they need without the whole state.
#[derive(Clone, Default)]
pub struct AppState {
    /// The live set of open realtime connections for this process
    pub registry: ConnectionRegistry,
}

impl AppState {
    /// Create a new application state with an empty registry
    pub fn new() -> Self {
        Self::default()
    }
}

/// Allow handlers to extract the registry directly
impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}
