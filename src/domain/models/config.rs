//! Configuration model for issue-mirror.

use serde::{Deserialize, Serialize};

/// Main configuration structure.
///
/// Loaded hierarchically by the config loader: programmatic defaults,
/// then the project YAML file, then `ISSUE_MIRROR_*` environment
/// variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Source tracker (GitHub) configuration.
    #[serde(default)]
    pub github: GithubConfig,

    /// Target tracker (Jira) configuration.
    #[serde(default)]
    pub jira: JiraConfig,

    /// Summary generator (Ollama) configuration.
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// Poll scheduling configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Source tracker (GitHub) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GithubConfig {
    /// Repository owner (user or organisation name).
    #[serde(default)]
    pub owner: String,

    /// Repository name.
    #[serde(default)]
    pub repo: String,

    /// Personal access token or fine-grained token.
    #[serde(default)]
    pub token: String,

    /// API base URL. Only overridden in tests.
    #[serde(default = "default_github_api_base")]
    pub api_base_url: String,

    /// Whether to write a back-link into the source issue body after a
    /// mirror is created.
    #[serde(default = "default_true")]
    pub link_back: bool,
}

fn default_github_api_base() -> String {
    "https://api.github.com".to_string()
}

const fn default_true() -> bool {
    true
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            token: String::new(),
            api_base_url: default_github_api_base(),
            link_back: true,
        }
    }
}

/// Target tracker (Jira) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JiraConfig {
    /// Jira base URL (e.g. `https://yourcompany.atlassian.net`).
    #[serde(default)]
    pub base_url: String,

    /// Account username (email for Jira Cloud).
    #[serde(default)]
    pub username: String,

    /// API token used with basic authentication.
    #[serde(default)]
    pub api_token: String,

    /// Project key new issues are created under.
    #[serde(default = "default_project_key")]
    pub project_key: String,

    /// Issue-type name for created issues.
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
}

fn default_project_key() -> String {
    "GT".to_string()
}

fn default_issue_type() -> String {
    "Task".to_string()
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            api_token: String::new(),
            project_key: default_project_key(),
            issue_type: default_issue_type(),
        }
    }
}

/// Summary generator (Ollama) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SummarizerConfig {
    /// Ollama base URL.
    #[serde(default = "default_ollama_base")]
    pub base_url: String,

    /// Model name passed to the generate endpoint.
    #[serde(default = "default_model")]
    pub model: String,

    /// Custom prompt template with exactly one `{content}` placeholder.
    /// Empty means the built-in default template.
    #[serde(default)]
    pub prompt_template: String,

    /// Per-issue summary timeout in seconds. Must be shorter than the
    /// poll interval.
    #[serde(default = "default_summary_timeout")]
    pub timeout_secs: u64,
}

fn default_ollama_base() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "mistral".to_string()
}

const fn default_summary_timeout() -> u64 {
    30
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base(),
            model: default_model(),
            prompt_template: String::new(),
            timeout_secs: default_summary_timeout(),
        }
    }
}

/// Poll scheduling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

const fn default_poll_interval() -> u64 {
    60
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, or error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "pretty" or "json".
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert!(config.github.link_back);
        assert_eq!(config.jira.project_key, "GT");
        assert_eq!(config.jira.issue_type, "Task");
        assert_eq!(config.summarizer.model, "mistral");
        assert_eq!(config.summarizer.base_url, "http://localhost:11434");
        assert_eq!(config.summarizer.timeout_secs, 30);
        assert_eq!(config.scheduler.poll_interval_secs, 60);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
github:
  owner: my-org
  repo: my-repo
  token: ghp_abc
jira:
  base_url: https://jira.example.com
"#;
        let config: Config = serde_yaml_from_str(yaml);
        assert_eq!(config.github.owner, "my-org");
        // Untouched sections keep their defaults.
        assert_eq!(config.jira.project_key, "GT");
        assert_eq!(config.summarizer.model, "mistral");
    }

    // Minimal YAML deserialization through figment, which is how the
    // loader consumes this model in production.
    fn serde_yaml_from_str(yaml: &str) -> Config {
        use figment::providers::{Format, Yaml};
        figment::Figment::new()
            .merge(figment::providers::Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
            .unwrap()
    }

    #[test]
    fn test_config_round_trips_through_serde() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scheduler.poll_interval_secs, 60);
        assert_eq!(back.github.link_back, config.github.link_back);
    }
}
