//! Hierarchical configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::summary::CONTENT_PLACEHOLDER;
use crate::domain::models::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("github.owner is required")]
    MissingGithubOwner,

    #[error("github.repo is required")]
    MissingGithubRepo,

    #[error("github.token is required")]
    MissingGithubToken,

    #[error("jira.base_url is required")]
    MissingJiraBaseUrl,

    #[error("jira.username and jira.api_token are required")]
    MissingJiraCredentials,

    #[error("jira.project_key cannot be empty")]
    EmptyProjectKey,

    #[error("jira.issue_type cannot be empty")]
    EmptyIssueType,

    #[error("summarizer.model cannot be empty")]
    EmptyModel,

    #[error(
        "Prompt template must contain exactly one {{content}} placeholder, found {0}"
    )]
    InvalidPromptTemplate(usize),

    #[error("scheduler.poll_interval_secs must be positive")]
    InvalidPollInterval,

    #[error(
        "summarizer.timeout_secs ({0}) must be positive and shorter than scheduler.poll_interval_secs ({1})"
    )]
    InvalidSummaryTimeout(u64, u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .issue-mirror/config.yaml (project config)
    /// 3. Environment variables (`ISSUE_MIRROR_*` prefix, `__` section
    ///    separator, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".issue-mirror/config.yaml"))
            .merge(Env::prefixed("ISSUE_MIRROR_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("ISSUE_MIRROR_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.owner.is_empty() {
            return Err(ConfigError::MissingGithubOwner);
        }
        if config.github.repo.is_empty() {
            return Err(ConfigError::MissingGithubRepo);
        }
        if config.github.token.is_empty() {
            return Err(ConfigError::MissingGithubToken);
        }

        if config.jira.base_url.is_empty() {
            return Err(ConfigError::MissingJiraBaseUrl);
        }
        if config.jira.username.is_empty() || config.jira.api_token.is_empty() {
            return Err(ConfigError::MissingJiraCredentials);
        }
        if config.jira.project_key.is_empty() {
            return Err(ConfigError::EmptyProjectKey);
        }
        if config.jira.issue_type.is_empty() {
            return Err(ConfigError::EmptyIssueType);
        }

        if config.summarizer.model.is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        // A custom template is checked up front so a bad one fails at
        // startup rather than on the first summary call. Empty means the
        // built-in default, which is known-good.
        if !config.summarizer.prompt_template.is_empty() {
            let occurrences = config
                .summarizer
                .prompt_template
                .matches(CONTENT_PLACEHOLDER)
                .count();
            if occurrences != 1 {
                return Err(ConfigError::InvalidPromptTemplate(occurrences));
            }
        }

        if config.scheduler.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }

        // The per-issue summary timeout must leave room inside the cycle
        // interval.
        if config.summarizer.timeout_secs == 0
            || config.summarizer.timeout_secs >= config.scheduler.poll_interval_secs
        {
            return Err(ConfigError::InvalidSummaryTimeout(
                config.summarizer.timeout_secs,
                config.scheduler.poll_interval_secs,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.github.owner = "my-org".to_string();
        config.github.repo = "my-repo".to_string();
        config.github.token = "ghp_token".to_string();
        config.jira.base_url = "https://jira.example.com".to_string();
        config.jira.username = "bot@example.com".to_string();
        config.jira.api_token = "secret".to_string();
        config
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(ConfigLoader::validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_owner() {
        let mut config = valid_config();
        config.github.owner = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingGithubOwner)
        ));
    }

    #[test]
    fn test_validate_rejects_missing_jira_credentials() {
        let mut config = valid_config();
        config.jira.api_token = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::MissingJiraCredentials)
        ));
    }

    #[test]
    fn test_validate_rejects_zero_poll_interval() {
        let mut config = valid_config();
        config.scheduler.poll_interval_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPollInterval)
        ));
    }

    #[test]
    fn test_validate_rejects_timeout_not_shorter_than_interval() {
        let mut config = valid_config();
        config.scheduler.poll_interval_secs = 30;
        config.summarizer.timeout_secs = 30;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidSummaryTimeout(30, 30))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_prompt_template() {
        let mut config = valid_config();
        config.summarizer.prompt_template = "missing placeholder".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPromptTemplate(0))
        ));
    }

    #[test]
    fn test_validate_accepts_single_placeholder_template() {
        let mut config = valid_config();
        config.summarizer.prompt_template = "Summarize: {content}".to_string();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = valid_config();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_load_from_file_merges_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            r#"
github:
  owner: my-org
  repo: my-repo
  token: ghp_abc
jira:
  base_url: https://jira.example.com
  username: bot@example.com
  api_token: secret
"#
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.github.owner, "my-org");
        // Sections absent from the file keep their defaults.
        assert_eq!(config.jira.project_key, "GT");
        assert_eq!(config.scheduler.poll_interval_secs, 60);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_config() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "github:\n  owner: only-owner").unwrap();

        let result = ConfigLoader::load_from_file(file.path());
        assert!(result.is_err());
    }
}
