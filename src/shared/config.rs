//! Client configuration module
//!
//! Provides configuration types for the delivery client.

use std::time::Duration;

use thiserror::Error;

/// Delivery client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Persistence Gateway (e.g. `http://localhost:5000`)
    pub gateway_url: String,
    /// WebSocket URL of the realtime endpoint (e.g. `ws://localhost:5000/ws`)
    pub realtime_url: String,
    /// Initial reconnect backoff delay
    pub backoff_base: Duration,
    /// Upper bound on the reconnect backoff delay
    pub backoff_max: Duration,
}

impl ClientConfig {
    /// Create a new ClientConfigBuilder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    gateway_url: Option<String>,
    realtime_url: Option<String>,
    backoff_base: Option<Duration>,
    backoff_max: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Set the Persistence Gateway base URL
    pub fn gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = Some(url.into());
        self
    }

    /// Set the realtime endpoint URL
    pub fn realtime_url(mut self, url: impl Into<String>) -> Self {
        self.realtime_url = Some(url.into());
        self
    }

    /// Set the initial reconnect backoff delay
    pub fn backoff_base(mut self, delay: Duration) -> Self {
        self.backoff_base = Some(delay);
        self
    }

    /// Set the maximum reconnect backoff delay
    pub fn backoff_max(mut self, delay: Duration) -> Self {
        self.backoff_max = Some(delay);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let gateway_url = self
            .gateway_url
            .ok_or(ConfigError::MissingValue("gateway_url"))?;
        let realtime_url = self
            .realtime_url
            .ok_or(ConfigError::MissingValue("realtime_url"))?;
        if !gateway_url.starts_with("http://") && !gateway_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(gateway_url));
        }
        if !realtime_url.starts_with("ws://") && !realtime_url.starts_with("wss://") {
            return Err(ConfigError::InvalidUrl(realtime_url));
        }
        Ok(ClientConfig {
            gateway_url,
            realtime_url,
            backoff_base: self.backoff_base.unwrap_or(Duration::from_secs(1)),
            backoff_max: self.backoff_max.unwrap_or(Duration::from_secs(60)),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
