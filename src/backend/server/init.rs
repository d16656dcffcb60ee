/**
 * Server Initialization
 *
 * This module is the composition root of the relay server: it creates the
 * connection registry, assembles the application state, and configures
 * the router.
 *
 * # Initialization Process
 *
 * 1. Create the connection registry (the only shared mutable resource)
 * 2. Assemble `AppState`
 * 3. Create the router with all routes
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app() -> Router<()> {
    tracing::info!("[Startup] Initializing huddle relay server");

    // Step 1: Create the connection registry.
    // Owned here at the composition root and passed down by handle; the
    // registry is process-local, so this design does not scale past one
    // server process without an added distribution layer.
    let app_state = AppState::new();

    // Step 2: Create router with all routes
    let app = create_router(app_state);

    tracing::info!("[Startup] Router configured");

    app
}
