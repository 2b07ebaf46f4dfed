//! Jira REST API v2 wire models for issue creation.

use serde::{Deserialize, Serialize};

/// Request body for `POST /rest/api/2/issue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraCreateIssueRequest {
    /// The issue fields envelope.
    pub fields: JiraIssueFields,
}

/// The `fields` object of an issue-creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssueFields {
    /// Target project reference.
    pub project: JiraProjectRef,
    /// One-line summary.
    pub summary: String,
    /// Full description text.
    pub description: String,
    /// Issue type reference.
    pub issuetype: JiraIssueTypeRef,
}

/// Project reference by key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraProjectRef {
    /// Project key (e.g. "GT").
    pub key: String,
}

/// Issue type reference by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssueTypeRef {
    /// Issue type name (e.g. "Task").
    pub name: String,
}

/// Response from the issue-creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraCreateIssueResponse {
    /// The new issue's key (e.g. "GT-24").
    pub key: String,
    /// The new issue's numeric id.
    #[serde(default)]
    pub id: String,
    /// API URL of the created issue.
    #[serde(rename = "self", default)]
    pub self_url: String,
}
