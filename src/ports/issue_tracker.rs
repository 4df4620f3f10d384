//! Issue tracker port.
//!
//! Defines the contract for filing a ticket with the external tracking
//! service. Implementations own authentication, the wire format and
//! error-message extraction; callers only see `TrackerError`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::Timestamp;
use crate::domain::survey::Priority;

/// A create-issue request, fully assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub queue: String,
    pub summary: String,
    pub description: String,
    pub priority: Priority,
    pub created_by: String,
    pub created_at: Timestamp,
    /// Carried when a flow supplies one; the survey flows never do.
    pub assignee: Option<String>,
}

/// The tracker's acknowledgement of a created issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    pub key: String,
}

/// Failures surfaced by tracker implementations.
///
/// None of these are retried automatically; the dispatcher reports them
/// to the user and clears the session.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The short-lived access credential could not be obtained.
    #[error("failed to obtain access credential: {0}")]
    Credential(String),

    /// The tracker answered with a non-success status.
    #[error("API Error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable response (network, timeout).
    #[error("tracker request failed: {0}")]
    Transport(String),

    /// A success response that does not match the expected shape.
    #[error("malformed tracker response: {0}")]
    MalformedResponse(String),
}

/// Port for creating issues in the external tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Files one issue. Exactly one attempt: failures propagate with
    /// enough detail to render a user-facing message.
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_tracker_is_object_safe() {
        fn _accepts_dyn(_tracker: &dyn IssueTracker) {}
    }

    #[test]
    fn tracker_error_messages_carry_detail() {
        let err = TrackerError::Api { status: 422, message: "queue: unknown".to_string() };
        assert_eq!(err.to_string(), "API Error (422): queue: unknown");
    }
}
