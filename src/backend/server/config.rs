/**
 * Server Configuration
 *
 * This module handles loading of server configuration from environment
 * variables, with sensible defaults for local development.
 *
 * # Error Handling
 *
 * Configuration problems are logged and fall back to defaults; they do
 * not prevent server startup.
 */

use std::net::SocketAddr;

/// Default port when `SERVER_PORT` is unset or unparsable
const DEFAULT_PORT: u16 = 5000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port the server binds to
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from the environment
    ///
    /// Reads `SERVER_PORT`; an unset or invalid value falls back to the
    /// default with a warning.
    pub fn from_env() -> Self {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!(
                        "SERVER_PORT '{}' is not a valid port, using {}",
                        raw,
                        DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };
        Self { port }
    }

    /// The socket address to bind
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        let config = ServerConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig { port: 8080 };
        assert_eq!(config.bind_addr().port(), 8080);
    }
}
