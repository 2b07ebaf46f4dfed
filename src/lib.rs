//! issue-mirror - GitHub-to-Jira issue mirroring daemon
//!
//! Periodically polls a GitHub repository for open issues, generates a
//! structured summary for each through a local Ollama model (consumed as
//! an incremental token stream), creates a matching Jira issue, and
//! writes a back-link into the GitHub issue body.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layering:
//!
//! - **Domain Layer** (`domain`): models, errors, and the port traits the
//!   pipeline is written against
//! - **Service Layer** (`services`): the pipeline itself — summary
//!   generation, deduplication ledger, issue mirroring, poll cycle, and
//!   the periodic daemon
//! - **Adapters** (`adapters`): GitHub, Jira, and Ollama wire clients
//! - **Infrastructure Layer** (`infrastructure`): configuration loading
//! - **CLI Layer** (`cli`): command-line interface and startup wiring
//!
//! # Example
//!
//! ```ignore
//! use issue_mirror::cli::{execute, load_config, Cli};
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cli = Cli::parse();
//!     let config = load_config(&cli)?;
//!     execute(cli, config).await
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, GithubConfig, JiraConfig, LoggingConfig, SchedulerConfig, SourceIssue,
    SummarizerConfig, SummaryEvent, TargetIssueKey, TargetIssuePayload,
};
pub use domain::ports::{IssueSink, IssueSource, ProcessedLedger, Summarizer};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    CycleStats, DaemonHandle, InMemoryLedger, MirrorService, PollCycle, PollDaemon,
    SummaryGenerator,
};
