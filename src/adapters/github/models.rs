//! GitHub Issues API wire models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads. They are
//! internal to the GitHub adapter; the rest of the crate sees
//! [`crate::domain::models::SourceIssue`].

use serde::{Deserialize, Serialize};

/// An item returned by the repository issues endpoint.
///
/// Note: issues and pull requests share the same endpoint. Pull requests
/// carry a non-null `pull_request` field; the poll cycle skips those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    /// Unique numeric identifier for the issue.
    pub id: u64,
    /// Sequential number within the repository.
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body text (may be absent or null).
    #[serde(default)]
    pub body: Option<String>,
    /// Current state: "open" or "closed".
    pub state: String,
    /// Present when this item is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<GitHubPullRequestRef>,
    /// URL to view the issue in the GitHub UI.
    pub html_url: String,
    /// ISO 8601 timestamp of creation.
    pub created_at: String,
}

/// Reference object present on pull requests (absent on plain issues).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubPullRequestRef {
    /// API URL of the pull request resource.
    pub url: String,
}

/// Request body for updating (patching) an issue's body text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssueBodyUpdate {
    /// The full replacement body.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_issue_deserialization() {
        let json = r#"{
            "id": 101,
            "number": 42,
            "title": "Crash on save",
            "body": "steps...",
            "state": "open",
            "pull_request": null,
            "html_url": "https://github.com/org/repo/issues/42",
            "created_at": "2024-01-14T08:00:00Z"
        }"#;
        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.id, 101);
        assert_eq!(issue.number, 42);
        assert_eq!(issue.title, "Crash on save");
        assert!(issue.pull_request.is_none());
        assert_eq!(issue.body.as_deref(), Some("steps..."));
    }

    #[test]
    fn test_null_body_deserialization() {
        let json = r#"{
            "id": 102,
            "number": 7,
            "title": "Empty issue",
            "body": null,
            "state": "open",
            "html_url": "https://github.com/org/repo/issues/7",
            "created_at": "2024-01-10T00:00:00Z"
        }"#;
        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        assert!(issue.body.is_none());
    }

    #[test]
    fn test_pr_detection_via_pull_request_field() {
        let json = r#"{
            "id": 103,
            "number": 99,
            "title": "Add feature X",
            "state": "open",
            "pull_request": { "url": "https://api.github.com/repos/org/repo/pulls/99" },
            "html_url": "https://github.com/org/repo/pull/99",
            "created_at": "2024-01-15T09:00:00Z"
        }"#;
        let issue: GitHubIssue = serde_json::from_str(json).unwrap();
        assert!(issue.pull_request.is_some());
    }

    #[test]
    fn test_body_update_serialization() {
        let update = GitHubIssueBodyUpdate {
            body: "new body".to_string(),
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"body":"new body"}"#);
    }
}
