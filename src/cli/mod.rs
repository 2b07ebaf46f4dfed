//! Command-line surface and startup wiring.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::github::{GitHubClient, GitHubIssueSource};
use crate::adapters::jira::JiraClient;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{InMemoryLedger, MirrorService, PollCycle, PollDaemon, SummaryGenerator};

/// Mirror GitHub issues into Jira with AI-generated summaries.
#[derive(Debug, Parser)]
#[command(name = "issue-mirror", version, about)]
pub struct Cli {
    /// Path to a configuration file (defaults to
    /// .issue-mirror/config.yaml plus ISSUE_MIRROR_* environment
    /// variables).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the mirroring daemon: one poll cycle immediately, then one per
    /// configured interval, forever.
    Run,
    /// Run a single poll cycle and exit. Useful for smoke tests and
    /// cron-style operation.
    Once,
}

/// Load configuration honoring the `--config` override.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// Wire the poll cycle from validated configuration.
///
/// This is the one place process-wide state is assembled; everything
/// downstream receives its collaborators explicitly.
pub fn build_poll_cycle(config: &Config) -> Result<PollCycle> {
    let github_client = GitHubClient::new(&config.github.token)
        .with_base_url(&config.github.api_base_url);
    let source = Arc::new(GitHubIssueSource::new(
        github_client,
        &config.github.owner,
        &config.github.repo,
    ));

    let sink = Arc::new(JiraClient::new(&config.jira));

    let summarizer = Arc::new(
        SummaryGenerator::new(&config.summarizer)
            .context("Failed to construct the summary generator")?,
    );

    let mirror = MirrorService::new(
        sink,
        source.clone(),
        &config.jira,
        config.github.link_back,
    );

    Ok(PollCycle::new(
        source,
        summarizer,
        mirror,
        Box::new(InMemoryLedger::new()),
    ))
}

/// Execute the parsed command line against loaded configuration.
pub async fn execute(cli: Cli, config: Config) -> Result<()> {
    let cycle = build_poll_cycle(&config)?;

    match cli.command {
        Commands::Run => {
            let daemon = PollDaemon::new(
                cycle,
                Duration::from_secs(config.scheduler.poll_interval_secs),
            );
            tokio::select! {
                () = daemon.run() => {}
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, shutting down");
                }
            }
            Ok(())
        }
        Commands::Once => {
            let mut cycle = cycle;
            let stats = cycle.poll_once().await?;
            tracing::info!(
                mirrored = stats.mirrored,
                failed = stats.failed,
                "Single cycle complete"
            );
            Ok(())
        }
    }
}
