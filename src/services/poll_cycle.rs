//! One poll cycle: fetch, summarize, mirror, record.
//!
//! Per-issue failures are isolated: a failed summary or creation is
//! logged and the cycle moves on; the issue is not marked processed, so
//! the next cycle retries it from scratch. Only a failed list-fetch ends
//! the cycle wholesale.

use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{IssueSource, ProcessedLedger, Summarizer};

use super::mirror::MirrorService;

/// Counters describing one cycle's outcome, for logging and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    /// Items returned by the source tracker, pull requests included.
    pub fetched: usize,
    /// Items skipped because they are pull requests.
    pub pull_requests_skipped: usize,
    /// Issues skipped because the ledger already marks them processed.
    pub already_processed: usize,
    /// Issues mirrored (created, possibly with a failed back-link).
    pub mirrored: usize,
    /// Mirrored issues whose back-link update failed.
    pub link_back_failures: usize,
    /// Issues whose summary or creation failed this cycle.
    pub failed: usize,
}

/// The poll cycle: the single execution path that reads and writes the
/// deduplication ledger.
pub struct PollCycle {
    source: Arc<dyn IssueSource>,
    summarizer: Arc<dyn Summarizer>,
    mirror: MirrorService,
    ledger: Box<dyn ProcessedLedger>,
}

impl PollCycle {
    /// Assemble the cycle from its collaborators.
    pub fn new(
        source: Arc<dyn IssueSource>,
        summarizer: Arc<dyn Summarizer>,
        mirror: MirrorService,
        ledger: Box<dyn ProcessedLedger>,
    ) -> Self {
        Self {
            source,
            summarizer,
            mirror,
            ledger,
        }
    }

    /// Run one cycle.
    ///
    /// Returns `Err` only when the initial list-fetch fails; every
    /// per-issue outcome is reported through the returned stats and the
    /// log stream.
    pub async fn poll_once(&mut self) -> DomainResult<CycleStats> {
        let issues = self.source.fetch_open_issues().await?;

        let mut stats = CycleStats {
            fetched: issues.len(),
            ..CycleStats::default()
        };

        for issue in &issues {
            // The issues endpoint interleaves pull requests with issues;
            // skip each one and keep scanning.
            if issue.is_pull_request {
                stats.pull_requests_skipped += 1;
                continue;
            }

            let summary = match self.summarizer.summarize(issue.body_text()).await {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::warn!(
                        issue = issue.number,
                        stage = "summary",
                        error = %e,
                        "Summary generation failed, will retry next cycle"
                    );
                    stats.failed += 1;
                    continue;
                }
            };

            if self.ledger.has(issue.id) {
                stats.already_processed += 1;
                continue;
            }

            tracing::info!(
                issue = issue.number,
                title = %issue.title,
                "New source issue detected"
            );

            let key = match self.mirror.create_mirror(issue, &summary).await {
                Ok(key) => key,
                Err(e) => {
                    tracing::error!(
                        issue = issue.number,
                        stage = "create",
                        error = %e,
                        "Mirror creation failed, will retry next cycle"
                    );
                    stats.failed += 1;
                    continue;
                }
            };

            // The mirror exists from here on: mark processed regardless of
            // the back-link outcome so a retry can never create a
            // duplicate. A failed link leaves the mirror unlinked.
            if let Err(e) = self.mirror.link_back(issue, &key).await {
                tracing::error!(
                    issue = issue.number,
                    key = %key,
                    stage = "link_back",
                    error = %e,
                    "Back-link update failed, mirror left unlinked"
                );
                stats.link_back_failures += 1;
            }

            self.ledger.mark_processed(issue.id);
            stats.mirrored += 1;
        }

        tracing::info!(
            fetched = stats.fetched,
            pull_requests_skipped = stats.pull_requests_skipped,
            already_processed = stats.already_processed,
            mirrored = stats.mirrored,
            link_back_failures = stats.link_back_failures,
            failed = stats.failed,
            ledger_size = self.ledger.len(),
            "Poll cycle complete"
        );

        Ok(stats)
    }
}
