//! Chat transport configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

/// Credentials and endpoints for the outbound chat API.
#[derive(Debug, Deserialize)]
pub struct TransportConfig {
    /// Bot credential issued by the transport. Required.
    pub bot_token: SecretString,

    /// API host; overridable for tests and proxies.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bound on each outbound send, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl TransportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.bot_token.expose_secret().is_empty() {
            return Err(ValidationError::invalid("transport.bot_token", "cannot be empty"));
        }
        if !self.api_base.starts_with("http") {
            return Err(ValidationError::invalid(
                "transport.api_base",
                "must be an http(s) URL",
            ));
        }
        Ok(())
    }
}
