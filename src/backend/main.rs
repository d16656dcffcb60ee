/**
 * Huddle Server Entry Point
 *
 * This is the main entry point for the huddle relay server. It
 * initializes tracing, loads configuration from the environment and runs
 * the Axum HTTP server with the realtime upgrade point.
 */

use huddle::backend::server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[Startup] Server initialization started");

    let config = ServerConfig::from_env();
    let app = huddle::backend::server::init::create_app().await;

    let addr = config.bind_addr();
    tracing::info!("[Startup] Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "[Startup] Realtime endpoint at ws://127.0.0.1:{}/ws",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
