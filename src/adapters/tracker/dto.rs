//! Wire types for the tracker REST API.

use serde::{Deserialize, Serialize};

use crate::ports::NewIssue;

/// Body of `POST /v2/issues/`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueRequest {
    pub queue: String,
    pub summary: String,
    pub description: String,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub priority: String,
    pub created_by: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// The tracker models issue types as named objects.
#[derive(Debug, Clone, Serialize)]
pub struct IssueType {
    pub name: String,
}

impl CreateIssueRequest {
    /// Maps a port-level issue onto the wire shape. Everything files as a
    /// plain Task.
    pub fn from_issue(issue: &NewIssue) -> Self {
        Self {
            queue: issue.queue.clone(),
            summary: issue.summary.clone(),
            description: issue.description.clone(),
            issue_type: IssueType { name: "Task".to_string() },
            priority: issue.priority.as_str().to_string(),
            created_by: issue.created_by.clone(),
            created_at: issue.created_at.as_wire_string(),
            assignee: issue.assignee.clone(),
        }
    }
}

/// Success body of `POST /v2/issues/`; only the key matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIssueResponse {
    pub key: String,
}

/// Token response from the instance-metadata service.
#[derive(Debug, Deserialize)]
pub struct MetadataTokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::domain::foundation::Timestamp;
    use crate::domain::survey::Priority;

    fn issue() -> NewIssue {
        NewIssue {
            queue: "CRMTEAM".to_string(),
            summary: "Fix banner".to_string(),
            description: "Banner broken on Android".to_string(),
            priority: Priority::Major,
            created_by: "crm.bot".to_string(),
            created_at: Timestamp::from_datetime(
                Utc.with_ymd_and_hms(2025, 6, 9, 14, 49, 11).unwrap(),
            ),
            assignee: None,
        }
    }

    #[test]
    fn request_serializes_to_tracker_contract() {
        let request = CreateIssueRequest::from_issue(&issue());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["queue"], "CRMTEAM");
        assert_eq!(json["type"]["name"], "Task");
        assert_eq!(json["priority"], "major");
        assert_eq!(json["createdBy"], "crm.bot");
        assert_eq!(json["createdAt"], "2025-06-09T14:49:11.000Z");
    }

    #[test]
    fn absent_assignee_is_omitted_from_the_body() {
        let request = CreateIssueRequest::from_issue(&issue());
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("assignee").is_none());
    }

    #[test]
    fn present_assignee_is_carried() {
        let mut source = issue();
        source.assignee = Some("on.call".to_string());
        let json = serde_json::to_value(CreateIssueRequest::from_issue(&source)).unwrap();
        assert_eq!(json["assignee"], "on.call");
    }

    #[test]
    fn response_parses_issue_key() {
        let response: CreateIssueResponse =
            serde_json::from_str(r#"{"key": "CRMTEAM-101", "summary": "Fix banner"}"#).unwrap();
        assert_eq!(response.key, "CRMTEAM-101");
    }
}
