//! Domain models: configuration, issues, and summary streaming.

pub mod config;
pub mod issue;
pub mod summary;

pub use config::{
    Config, GithubConfig, JiraConfig, LoggingConfig, SchedulerConfig, SummarizerConfig,
};
pub use issue::{SourceIssue, TargetIssueKey, TargetIssuePayload};
pub use summary::{SummaryEvent, SummaryRequest, CONTENT_PLACEHOLDER, DEFAULT_PROMPT_TEMPLATE};
