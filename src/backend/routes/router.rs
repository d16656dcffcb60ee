/**
 * Router Configuration
 *
 * This module provides the main router creation function for the relay
 * server.
 *
 * # Routes
 *
 * - `GET /ws` - Realtime WebSocket upgrade (no handshake payload, no
 *   authentication token; see the realtime module docs)
 * - `GET /health` - Liveness probe returning the live connection count
 * - anything else - JSON 404 (the REST API lives in the Persistence
 *   Gateway, not here)
 */

use axum::{extract::State, http::StatusCode, http::Uri, routing::get, Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::realtime::socket::handle_realtime_upgrade;
use crate::backend::realtime::ConnectionRegistry;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the connection registry
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .route("/ws", get(handle_realtime_upgrade))
        .route("/health", get(handle_health))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Liveness probe (GET /health)
async fn handle_health(State(registry): State<ConnectionRegistry>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "connections": registry.len(),
    }))
}

/// JSON 404 for any path outside the realtime surface
async fn handle_not_found(uri: Uri) -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, format!("no route for {}", uri.path()))
}
