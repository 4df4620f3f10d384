//! Tracker REST client.
//!
//! Implements the `IssueTracker` port against the tracker's v2 API:
//! acquires a bearer token per call, posts the issue, and turns error
//! bodies into readable messages.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::ports::{AccessTokenProvider, CreatedIssue, IssueTracker, NewIssue, TrackerError};

use super::dto::{CreateIssueRequest, CreateIssueResponse};

/// Header naming the acting user on every tracker call.
const USER_LOGIN_HEADER: &str = "X-User-Login";

/// Configuration for the tracker client.
#[derive(Debug, Clone)]
pub struct TrackerApiConfig {
    /// API base, e.g. "https://tracker.example.com".
    pub base_url: String,

    /// Login sent in the acting-user header and logged per request.
    pub user_login: String,

    /// Bound on the create-issue call; generous compared to the token
    /// fetch because issue creation is the slow path.
    pub request_timeout: Duration,
}

impl TrackerApiConfig {
    fn issues_url(&self) -> String {
        format!("{}/v2/issues/", self.base_url.trim_end_matches('/'))
    }
}

/// Production `IssueTracker` implementation.
pub struct TrackerClient {
    config: TrackerApiConfig,
    http: reqwest::Client,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl TrackerClient {
    /// Creates a client; the token provider is consulted on every call.
    pub fn new(
        config: TrackerApiConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, TrackerError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TrackerError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http, tokens })
    }
}

#[async_trait]
impl IssueTracker for TrackerClient {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, TrackerError> {
        let token = self.tokens.access_token().await?;

        let request = CreateIssueRequest::from_issue(issue);
        tracing::info!(
            queue = %issue.queue,
            user = %self.config.user_login,
            priority = %issue.priority,
            "creating tracker issue"
        );

        let response = self
            .http
            .post(self.config.issues_url())
            .bearer_auth(token.expose_secret())
            .header(USER_LOGIN_HEADER, &self.config.user_login)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("tracker request failed: {e}");
                TrackerError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            tracing::error!(status = status.as_u16(), %message, "tracker rejected the issue");
            return Err(TrackerError::Api { status: status.as_u16(), message });
        }

        let created: CreateIssueResponse = response.json().await.map_err(|e| {
            tracing::error!("unexpected tracker response shape: {e}");
            TrackerError::MalformedResponse(e.to_string())
        })?;

        tracing::info!(key = %created.key, "tracker issue created");
        Ok(CreatedIssue { key: created.key })
    }
}

impl std::fmt::Debug for TrackerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerClient")
            .field("base_url", &self.config.base_url)
            .field("user_login", &self.config.user_login)
            .finish_non_exhaustive()
    }
}

/// Pulls the most specific message out of an error body.
///
/// Checks, in order: a `errors` map of per-field messages, a flat
/// `errorMessages` list, a generic `message` field. Unparseable bodies
/// come back verbatim.
fn extract_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    if let Some(errors) = value.get("errors").and_then(|v| v.as_object()) {
        let rendered: Vec<String> = errors
            .iter()
            .map(|(field, message)| format!("{}: {}", field, render_value(message)))
            .collect();
        if !rendered.is_empty() {
            return rendered.join("; ");
        }
    }

    if let Some(messages) = value.get("errorMessages").and_then(|v| v.as_array()) {
        let rendered: Vec<String> = messages.iter().map(render_value).collect();
        if !rendered.is_empty() {
            return rendered.join("; ");
        }
    }

    if let Some(message) = value.get("message") {
        return render_value(message);
    }

    value.to_string()
}

fn render_value(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod error_extraction {
        use super::*;

        #[test]
        fn field_errors_take_precedence() {
            let body = r#"{
                "errors": {"queue": "Queue does not exist"},
                "errorMessages": ["ignored"],
                "message": "also ignored"
            }"#;
            assert_eq!(extract_error_message(body), "queue: Queue does not exist");
        }

        #[test]
        fn error_messages_list_is_second_choice() {
            let body = r#"{"errorMessages": ["Summary too long", "Queue required"]}"#;
            assert_eq!(
                extract_error_message(body),
                "Summary too long; Queue required"
            );
        }

        #[test]
        fn generic_message_is_third_choice() {
            let body = r#"{"message": "Internal error"}"#;
            assert_eq!(extract_error_message(body), "Internal error");
        }

        #[test]
        fn non_json_body_comes_back_verbatim() {
            assert_eq!(extract_error_message("<html>502</html>"), "<html>502</html>");
        }

        #[test]
        fn multiple_field_errors_join_with_semicolons() {
            let body = r#"{"errors": {"queue": "unknown", "summary": "empty"}}"#;
            let message = extract_error_message(body);
            assert!(message.contains("queue: unknown"));
            assert!(message.contains("summary: empty"));
            assert!(message.contains("; "));
        }

        #[test]
        fn non_string_error_values_render_as_json() {
            let body = r#"{"errors": {"fields": ["a", "b"]}}"#;
            assert_eq!(extract_error_message(body), r#"fields: ["a","b"]"#);
        }
    }

    mod config {
        use super::*;

        #[test]
        fn issues_url_appends_api_path() {
            let config = TrackerApiConfig {
                base_url: "https://tracker.example.com".to_string(),
                user_login: "crm.bot".to_string(),
                request_timeout: Duration::from_secs(27),
            };
            assert_eq!(config.issues_url(), "https://tracker.example.com/v2/issues/");
        }

        #[test]
        fn issues_url_handles_trailing_slash() {
            let config = TrackerApiConfig {
                base_url: "https://tracker.example.com/".to_string(),
                user_login: "crm.bot".to_string(),
                request_timeout: Duration::from_secs(27),
            };
            assert_eq!(config.issues_url(), "https://tracker.example.com/v2/issues/");
        }
    }

    #[test]
    fn tracker_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrackerClient>();
    }
}
