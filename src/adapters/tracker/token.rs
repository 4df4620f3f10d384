//! Instance-metadata token provider.
//!
//! Obtains the short-lived tracker credential from the compute instance's
//! metadata service. The service requires a fixed flavor header and
//! answers quickly or not at all, so the timeout is short.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::ports::{AccessTokenProvider, TrackerError};

use super::dto::MetadataTokenResponse;

/// Header the metadata service requires on every request.
const METADATA_FLAVOR: (&str, &str) = ("Metadata-Flavor", "Google");

/// Token provider backed by the instance-metadata service.
pub struct MetadataTokenProvider {
    url: String,
    http: reqwest::Client,
}

impl MetadataTokenProvider {
    /// Creates a provider for the given metadata endpoint.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrackerError::Credential(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { url: url.into(), http })
    }
}

#[async_trait]
impl AccessTokenProvider for MetadataTokenProvider {
    async fn access_token(&self) -> Result<SecretString, TrackerError> {
        tracing::debug!(url = %self.url, "requesting access token from metadata service");

        let response = self
            .http
            .get(&self.url)
            .header(METADATA_FLAVOR.0, METADATA_FLAVOR.1)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("metadata service unreachable: {e}");
                TrackerError::Credential(format!("metadata service unreachable: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, "metadata service returned non-success status");
            return Err(TrackerError::Credential(format!(
                "metadata service returned status {}",
                status.as_u16()
            )));
        }

        let token: MetadataTokenResponse = response.json().await.map_err(|e| {
            tracing::error!("failed to parse metadata token response: {e}");
            TrackerError::Credential(format!("failed to parse token response: {e}"))
        })?;

        Ok(SecretString::new(token.access_token))
    }
}

impl std::fmt::Debug for MetadataTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataTokenProvider")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
