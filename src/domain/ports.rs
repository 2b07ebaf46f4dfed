//! Ports (trait seams) between the poll cycle and its collaborators.
//!
//! The pipeline services depend on these traits rather than on the
//! concrete GitHub / Jira / Ollama clients, so tests can substitute
//! in-memory fakes and the ledger can later be backed by a persistent
//! store without touching the poll cycle's logic.

use async_trait::async_trait;

use super::errors::DomainResult;
use super::models::{SourceIssue, TargetIssueKey, TargetIssuePayload};

/// Read (and optionally write-back) access to the source issue tracker.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch the open, creation-ordered issue list for the configured
    /// repository. Items that are pull requests are included with their
    /// flag set; filtering is the caller's concern.
    async fn fetch_open_issues(&self) -> DomainResult<Vec<SourceIssue>>;

    /// Replace an issue's body text. Used to append the back-link section.
    async fn update_issue_body(&self, number: u64, body: &str) -> DomainResult<()>;
}

/// Write access to the target issue tracker.
#[async_trait]
pub trait IssueSink: Send + Sync {
    /// Create an issue from the payload, returning the tracker-assigned key.
    async fn create_issue(&self, payload: &TargetIssuePayload) -> DomainResult<TargetIssueKey>;

    /// Human-facing URL for browsing an issue with the given key.
    fn browse_url(&self, key: &TargetIssueKey) -> String;
}

/// Turns raw issue text into a structured summary string.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Generate a summary for `content`, bounded by the generator's
    /// configured per-issue timeout. Partial output is never returned:
    /// on error or timeout the accumulated text is discarded.
    async fn summarize(&self, content: &str) -> DomainResult<String>;
}

/// Record of which source issues have already been mirrored.
///
/// Implementations need no interior locking: all reads and writes happen
/// on the serialized poll-cycle path.
pub trait ProcessedLedger: Send {
    /// Whether `id` has already been mirrored.
    fn has(&self, id: u64) -> bool;

    /// Mark `id` as mirrored. Called only after creation succeeds.
    fn mark_processed(&mut self, id: u64);

    /// Number of identifiers recorded so far.
    fn len(&self) -> usize;

    /// Whether no identifier has been recorded yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
