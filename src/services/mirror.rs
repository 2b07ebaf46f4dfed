//! Issue mirror: two-phase create-then-link against the target tracker.

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{JiraConfig, SourceIssue, TargetIssueKey, TargetIssuePayload};
use crate::domain::ports::{IssueSink, IssueSource};

/// Creates mirror issues in the target tracker and writes the back-link
/// into the source issue.
pub struct MirrorService {
    sink: Arc<dyn IssueSink>,
    source: Arc<dyn IssueSource>,
    project_key: String,
    issue_type: String,
    link_back_enabled: bool,
}

impl MirrorService {
    /// Create the service.
    pub fn new(
        sink: Arc<dyn IssueSink>,
        source: Arc<dyn IssueSource>,
        jira: &JiraConfig,
        link_back_enabled: bool,
    ) -> Self {
        Self {
            sink,
            source,
            project_key: jira.project_key.clone(),
            issue_type: jira.issue_type.clone(),
            link_back_enabled,
        }
    }

    /// Build the creation payload for one issue and its generated summary.
    pub fn build_payload(&self, issue: &SourceIssue, summary: &str) -> TargetIssuePayload {
        TargetIssuePayload {
            project_key: self.project_key.clone(),
            issue_type: self.issue_type.clone(),
            summary: format!("GitHub Issue #{}: {}", issue.number, issue.title),
            description: format!(
                "Imported from GitHub: {}\n\nSummarized Description:\n{}",
                issue.html_url, summary
            ),
        }
    }

    /// Create the mirror issue, returning the target tracker's key.
    pub async fn create_mirror(
        &self,
        issue: &SourceIssue,
        summary: &str,
    ) -> DomainResult<TargetIssueKey> {
        let payload = self.build_payload(issue, summary);
        let key = self.sink.create_issue(&payload).await?;

        tracing::info!(
            issue = issue.number,
            key = %key,
            "Mirror issue created"
        );
        Ok(key)
    }

    /// Append the back-link section to the source issue's body.
    ///
    /// A no-op when link-back is disabled. Failure is reported as
    /// [`DomainError::LinkBackFailed`], distinct from creation failure:
    /// the mirror exists but is unlinked, and that partial state is
    /// accepted rather than rolled back.
    pub async fn link_back(&self, issue: &SourceIssue, key: &TargetIssueKey) -> DomainResult<()> {
        if !self.link_back_enabled {
            tracing::debug!(issue = issue.number, "Back-link disabled, skipping");
            return Ok(());
        }

        let url = self.sink.browse_url(key);
        let body = append_link_section(issue.body_text(), key, &url);

        self.source
            .update_issue_body(issue.number, &body)
            .await
            .map_err(|e| DomainError::LinkBackFailed(e.to_string()))?;

        tracing::info!(issue = issue.number, key = %key, "Back-link written");
        Ok(())
    }
}

/// Append a delimited back-link section to an issue body.
fn append_link_section(existing: &str, key: &TargetIssueKey, url: &str) -> String {
    let section = format!("---\nMirrored to Jira: [{key}]({url})");
    if existing.is_empty() {
        section
    } else {
        format!("{existing}\n\n{section}")
    }
}
