//! Jira HTTP client implementing the [`IssueSink`] port.
//!
//! Creates issues through the REST API v2 with basic authentication.
//! Any non-2xx response is surfaced as [`DomainError::MirrorCreateFailed`]
//! carrying the status and response body; transport failures propagate
//! with the same variant.

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{JiraConfig, TargetIssueKey, TargetIssuePayload};
use crate::domain::ports::IssueSink;

use super::models::{
    JiraCreateIssueRequest, JiraCreateIssueResponse, JiraIssueFields, JiraIssueTypeRef,
    JiraProjectRef,
};

/// HTTP client for the Jira REST API v2 issue-creation endpoint.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    base_url: String,
    username: String,
    api_token: String,
}

impl JiraClient {
    /// Create a client from configuration.
    ///
    /// The base URL keeps no trailing slash so endpoint paths join
    /// predictably.
    pub fn new(config: &JiraConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            api_token: config.api_token.clone(),
        }
    }

    /// Build the wire request from a domain payload.
    fn to_wire_request(payload: &TargetIssuePayload) -> JiraCreateIssueRequest {
        JiraCreateIssueRequest {
            fields: JiraIssueFields {
                project: JiraProjectRef {
                    key: payload.project_key.clone(),
                },
                summary: payload.summary.clone(),
                description: payload.description.clone(),
                issuetype: JiraIssueTypeRef {
                    name: payload.issue_type.clone(),
                },
            },
        }
    }
}

#[async_trait]
impl IssueSink for JiraClient {
    async fn create_issue(&self, payload: &TargetIssuePayload) -> DomainResult<TargetIssueKey> {
        let url = format!("{}/rest/api/2/issue", self.base_url);
        let request = Self::to_wire_request(payload);

        let resp = self
            .http
            .post(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("User-Agent", "issue-mirror")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::MirrorCreateFailed(format!("Jira create request failed: {e}"))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::MirrorCreateFailed(format!(
                "Jira API responded with status {status}: {body}"
            )));
        }

        let created: JiraCreateIssueResponse = resp.json().await.map_err(|e| {
            DomainError::MirrorCreateFailed(format!("Jira create response parse failed: {e}"))
        })?;

        Ok(TargetIssueKey(created.key))
    }

    fn browse_url(&self, key: &TargetIssueKey) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }
}
