//! Shared in-memory fakes for the pipeline's ports.
//
// Each integration-test crate compiles this module independently and
// uses a different subset of it.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use issue_mirror::domain::errors::{DomainError, DomainResult};
use issue_mirror::domain::models::{SourceIssue, TargetIssueKey, TargetIssuePayload};
use issue_mirror::domain::ports::{IssueSink, IssueSource, Summarizer};

/// Build a plain issue snapshot.
pub fn make_issue(id: u64, number: u64, title: &str, body: &str) -> SourceIssue {
    SourceIssue {
        id,
        number,
        title: title.to_string(),
        body: Some(body.to_string()),
        html_url: format!("https://github.com/my-org/my-repo/issues/{number}"),
        is_pull_request: false,
        created_at: None,
    }
}

/// Build a pull-request snapshot.
pub fn make_pull_request(id: u64, number: u64) -> SourceIssue {
    SourceIssue {
        id,
        number,
        title: format!("PR {number}"),
        body: Some("diff description".to_string()),
        html_url: format!("https://github.com/my-org/my-repo/pull/{number}"),
        is_pull_request: true,
        created_at: None,
    }
}

/// Scripted issue source: a fixed issue list plus failure switches.
#[derive(Default)]
pub struct MockSource {
    issues: Mutex<Vec<SourceIssue>>,
    fetch_calls: AtomicUsize,
    fail_fetch: Mutex<bool>,
    fail_update: Mutex<bool>,
    updates: Mutex<Vec<(u64, String)>>,
}

impl MockSource {
    pub fn new(issues: Vec<SourceIssue>) -> Self {
        Self {
            issues: Mutex::new(issues),
            ..Self::default()
        }
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        *self.fail_fetch.lock().unwrap() = fail;
    }

    pub fn set_fail_update(&self, fail: bool) {
        *self.fail_update.lock().unwrap() = fail;
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> Vec<(u64, String)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueSource for MockSource {
    async fn fetch_open_issues(&self) -> DomainResult<Vec<SourceIssue>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail_fetch.lock().unwrap() {
            return Err(DomainError::SourceUnavailable(
                "scripted fetch failure".to_string(),
            ));
        }
        Ok(self.issues.lock().unwrap().clone())
    }

    async fn update_issue_body(&self, number: u64, body: &str) -> DomainResult<()> {
        if *self.fail_update.lock().unwrap() {
            return Err(DomainError::SourceUnavailable(
                "scripted update failure".to_string(),
            ));
        }
        self.updates
            .lock()
            .unwrap()
            .push((number, body.to_string()));
        Ok(())
    }
}

/// Scripted issue sink: records creations and hands out sequential keys.
#[derive(Default)]
pub struct MockSink {
    created: Mutex<Vec<TargetIssuePayload>>,
    fail_create: Mutex<bool>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_create(&self, fail: bool) {
        *self.fail_create.lock().unwrap() = fail;
    }

    pub fn created(&self) -> Vec<TargetIssuePayload> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueSink for MockSink {
    async fn create_issue(&self, payload: &TargetIssuePayload) -> DomainResult<TargetIssueKey> {
        if *self.fail_create.lock().unwrap() {
            return Err(DomainError::MirrorCreateFailed(
                "scripted create failure".to_string(),
            ));
        }
        let mut created = self.created.lock().unwrap();
        created.push(payload.clone());
        Ok(TargetIssueKey(format!("GT-{}", created.len())))
    }

    fn browse_url(&self, key: &TargetIssueKey) -> String {
        format!("https://jira.example.com/browse/{key}")
    }
}

/// Scripted summarizer: fails when the content contains a marker.
#[derive(Default)]
pub struct MockSummarizer {
    fail_marker: Mutex<Option<String>>,
    calls: Mutex<Vec<String>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_marker(&self, marker: Option<&str>) {
        *self.fail_marker.lock().unwrap() = marker.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, content: &str) -> DomainResult<String> {
        self.calls.lock().unwrap().push(content.to_string());
        if let Some(marker) = self.fail_marker.lock().unwrap().as_deref() {
            if content.contains(marker) {
                return Err(DomainError::GenerationFailed(
                    "scripted generation failure".to_string(),
                ));
            }
        }
        Ok("S".to_string())
    }
}
