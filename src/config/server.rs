//! Webhook server configuration.

use serde::Deserialize;

use super::error::ValidationError;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Bind address for the webhook surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, defaults to all interfaces.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind, defaults to 8080.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// The bind address in `host:port` form.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.is_empty() {
            return Err(ValidationError::invalid("server.host", "cannot be empty"));
        }
        if self.port == 0 {
            return Err(ValidationError::invalid("server.port", "cannot be zero"));
        }
        Ok(())
    }
}
