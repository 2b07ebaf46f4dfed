//! GitHub HTTP client with rate limiting.
//!
//! Wraps the two GitHub REST API v3 operations the mirror needs: listing
//! open issues and patching an issue body. A token-bucket rate limiter
//! keeps the poller within the 5 000 req/hour authenticated API limit.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};

use super::models::{GitHubIssue, GitHubIssueBodyUpdate};

/// Default base URL for the GitHub REST API v3.
const GITHUB_API_BASE: &str = "https://api.github.com";

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    tokens: u32,
    window: Duration,
    window_start: Instant,
}

impl RateLimiter {
    /// Create a limiter with the given capacity and refill window.
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// Acquire one token, sleeping until the window resets when none
    /// are left.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                sleep_ms = remaining.as_millis() as u64,
                "GitHub rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            self.tokens = self.capacity - 1;
            self.window_start = Instant::now();
        }
    }

    #[cfg(test)]
    pub(crate) fn tokens(&self) -> u32 {
        self.tokens
    }
}

/// HTTP client for the GitHub REST API v3.
///
/// All methods map HTTP and network failures to
/// [`DomainError::SourceUnavailable`] with the response status and body
/// included for diagnosis.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    token: String,
    base_url: String,
    /// Shared rate limiter (5 000 req/hr for authenticated requests).
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl GitHubClient {
    /// Create a new client with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        let rate_limiter = RateLimiter::new(5_000, Duration::from_secs(3_600));
        Self {
            http: Client::new(),
            token: token.into(),
            base_url: GITHUB_API_BASE.to_string(),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        }
    }

    /// Override the API base URL (configuration or tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Acquire a rate-limit token and build an authorized request.
    async fn rate_limited_request(
        &self,
        method: reqwest::Method,
        url: &str,
    ) -> reqwest::RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", "issue-mirror")
    }

    /// List open issues for a repository, ordered by creation time
    /// ascending.
    ///
    /// Note: GitHub's `/issues` endpoint also returns pull requests.
    /// Callers are responsible for filtering them out via the
    /// `pull_request` field.
    pub async fn list_open_issues(
        &self,
        owner: &str,
        repo: &str,
    ) -> DomainResult<Vec<GitHubIssue>> {
        let url = format!(
            "{}/repos/{}/{}/issues?state=open&sort=created&direction=asc&per_page=100",
            self.base_url, owner, repo
        );

        let req = self.rate_limited_request(reqwest::Method::GET, &url).await;

        let resp = req.send().await.map_err(|e| {
            DomainError::SourceUnavailable(format!("GitHub list_open_issues request failed: {e}"))
        })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::SourceUnavailable(format!(
                "GitHub list_open_issues returned {status}: {body}"
            )));
        }

        resp.json::<Vec<GitHubIssue>>().await.map_err(|e| {
            DomainError::SourceUnavailable(format!("GitHub list_open_issues parse failed: {e}"))
        })
    }

    /// Replace an issue's body text.
    pub async fn update_issue_body(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> DomainResult<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}",
            self.base_url, owner, repo, issue_number
        );
        let update = GitHubIssueBodyUpdate {
            body: body.to_string(),
        };

        let resp = self
            .rate_limited_request(reqwest::Method::PATCH, &url)
            .await
            .json(&update)
            .send()
            .await
            .map_err(|e| {
                DomainError::SourceUnavailable(format!(
                    "GitHub update_issue_body request failed: {e}"
                ))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(DomainError::SourceUnavailable(format!(
                "GitHub update_issue_body returned {status}: {body_text}"
            )));
        }

        Ok(())
    }
}
