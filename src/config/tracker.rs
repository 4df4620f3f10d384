//! Issue tracker configuration.

use serde::Deserialize;

use super::error::ValidationError;

fn default_credential_timeout_ms() -> u64 {
    3_050
}

fn default_request_timeout_ms() -> u64 {
    27_000
}

/// Endpoints and identity for the issue-tracker integration.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Tracker API base, e.g. "https://tracker.example.com". Required.
    pub base_url: String,

    /// Base for issue links shown to users. Required.
    pub browse_url: String,

    /// Queue new tickets file into. Required.
    pub queue: String,

    /// Acting-user login sent with every tracker call. Required.
    pub user_login: String,

    /// Instance-metadata endpoint issuing short-lived tokens. Required.
    pub metadata_url: String,

    /// Bound on credential acquisition, in milliseconds. Short: the
    /// metadata service answers quickly or not at all.
    #[serde(default = "default_credential_timeout_ms")]
    pub credential_timeout_ms: u64,

    /// Bound on issue creation, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http") {
            return Err(ValidationError::invalid("tracker.base_url", "must be an http(s) URL"));
        }
        if !self.browse_url.starts_with("http") {
            return Err(ValidationError::invalid("tracker.browse_url", "must be an http(s) URL"));
        }
        if self.queue.is_empty() {
            return Err(ValidationError::invalid("tracker.queue", "cannot be empty"));
        }
        if self.user_login.is_empty() {
            return Err(ValidationError::invalid("tracker.user_login", "cannot be empty"));
        }
        if !self.metadata_url.starts_with("http") {
            return Err(ValidationError::invalid(
                "tracker.metadata_url",
                "must be an http(s) URL",
            ));
        }
        Ok(())
    }
}
