//! Access token port.
//!
//! Issue creation authenticates with a short-lived credential obtained
//! per call. The production implementation asks the instance-metadata
//! service; tests substitute a fixed token.

use async_trait::async_trait;
use secrecy::SecretString;

use super::issue_tracker::TrackerError;

/// Port for acquiring the short-lived tracker credential.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Returns a currently valid bearer token.
    ///
    /// # Errors
    ///
    /// - `TrackerError::Credential` when the credential service is
    ///   unreachable or answers with a non-success status.
    async fn access_token(&self) -> Result<SecretString, TrackerError>;
}
