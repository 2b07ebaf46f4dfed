//! Core domain models for the mirroring pipeline.
//!
//! These types are deliberately free of wire-format concerns: the GitHub
//! and Jira adapters map their API payloads to and from these structs so
//! the poll cycle never touches tracker-specific JSON.

use chrono::{DateTime, Utc};

/// An immutable snapshot of one issue fetched from the source tracker.
///
/// Built fresh each poll cycle by the source adapter. The `id` is the
/// tracker's stable numeric identifier and is the key used by the
/// deduplication ledger; `number` is the human-facing display number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    /// Stable numeric identifier, unique across the tracker.
    pub id: u64,
    /// Display number within the repository (e.g. 42 for "#42").
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body text. Absent when the author left it empty.
    pub body: Option<String>,
    /// URL to view the issue in the source tracker's UI.
    pub html_url: String,
    /// True when the item is a pull request rather than an issue.
    pub is_pull_request: bool,
    /// When the issue was created. Advisory only; the poll cycle does not
    /// depend on ordering for correctness.
    pub created_at: Option<DateTime<Utc>>,
}

impl SourceIssue {
    /// The issue body, or the empty string when absent.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// The fields sent to the target tracker when creating a mirror issue.
///
/// Constructed fresh per creation call and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIssuePayload {
    /// Target project key (e.g. "GT").
    pub project_key: String,
    /// Target issue-type name (e.g. "Task").
    pub issue_type: String,
    /// One-line summary derived from the source issue number and title.
    pub summary: String,
    /// Description combining the source URL and the generated summary.
    pub description: String,
}

/// The identifier the target tracker assigns to a newly created issue
/// (e.g. "GT-24"). Used to build the browse URL for the back-link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetIssueKey(pub String);

impl std::fmt::Display for TargetIssueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TargetIssueKey {
    /// The raw key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
