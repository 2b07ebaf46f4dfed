//! GitHub-backed implementation of the [`IssueSource`] port.
//!
//! Maps the GitHub wire models into domain [`SourceIssue`] snapshots for
//! one configured owner/repository pair.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::DomainResult;
use crate::domain::models::SourceIssue;
use crate::domain::ports::IssueSource;

use super::client::GitHubClient;
use super::models::GitHubIssue;

/// Issue source bound to a single GitHub repository.
#[derive(Debug)]
pub struct GitHubIssueSource {
    client: GitHubClient,
    owner: String,
    repo: String,
}

impl GitHubIssueSource {
    /// Create a source for `owner/repo`.
    pub fn new(client: GitHubClient, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Convert a wire issue into a domain snapshot.
    fn to_source_issue(issue: &GitHubIssue) -> SourceIssue {
        let created_at = issue
            .created_at
            .parse::<DateTime<Utc>>()
            .ok();

        SourceIssue {
            id: issue.id,
            number: issue.number,
            title: issue.title.clone(),
            body: issue.body.clone(),
            html_url: issue.html_url.clone(),
            is_pull_request: issue.pull_request.is_some(),
            created_at,
        }
    }
}

#[async_trait]
impl IssueSource for GitHubIssueSource {
    async fn fetch_open_issues(&self) -> DomainResult<Vec<SourceIssue>> {
        tracing::debug!(owner = %self.owner, repo = %self.repo, "Fetching open GitHub issues");

        let issues = self
            .client
            .list_open_issues(&self.owner, &self.repo)
            .await?;

        let mapped: Vec<SourceIssue> = issues.iter().map(Self::to_source_issue).collect();

        tracing::debug!(count = mapped.len(), "GitHub issue fetch complete");
        Ok(mapped)
    }

    async fn update_issue_body(&self, number: u64, body: &str) -> DomainResult<()> {
        self.client
            .update_issue_body(&self.owner, &self.repo, number, body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::github::models::GitHubPullRequestRef;

    fn make_wire_issue(number: u64) -> GitHubIssue {
        GitHubIssue {
            id: number * 1000,
            number,
            title: format!("Issue {number}"),
            body: Some("Issue description".to_string()),
            state: "open".to_string(),
            pull_request: None,
            html_url: format!("https://github.com/my-org/my-repo/issues/{number}"),
            created_at: "2024-01-14T08:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_to_source_issue_maps_fields() {
        let wire = make_wire_issue(42);
        let issue = GitHubIssueSource::to_source_issue(&wire);

        assert_eq!(issue.id, 42_000);
        assert_eq!(issue.number, 42);
        assert_eq!(issue.title, "Issue 42");
        assert_eq!(issue.body.as_deref(), Some("Issue description"));
        assert_eq!(issue.html_url, "https://github.com/my-org/my-repo/issues/42");
        assert!(!issue.is_pull_request);
        assert!(issue.created_at.is_some());
    }

    #[test]
    fn test_to_source_issue_flags_pull_requests() {
        let mut wire = make_wire_issue(99);
        wire.pull_request = Some(GitHubPullRequestRef {
            url: "https://api.github.com/repos/my-org/my-repo/pulls/99".to_string(),
        });
        let issue = GitHubIssueSource::to_source_issue(&wire);
        assert!(issue.is_pull_request);
    }

    #[test]
    fn test_to_source_issue_tolerates_bad_timestamp() {
        let mut wire = make_wire_issue(1);
        wire.created_at = "not-a-timestamp".to_string();
        let issue = GitHubIssueSource::to_source_issue(&wire);
        assert!(issue.created_at.is_none());
    }
}
