//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/octoboard/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/octoboard/` (~/.config/octoboard/)
//! - State/Logs: `$XDG_STATE_HOME/octoboard/` (~/.local/state/octoboard/)

use crate::error::{Error, Result};
use crate::types::FieldKeys;
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Project field names backing the indirection table
    #[serde(default)]
    pub fields: FieldKeys,

    /// Text-completion endpoint configuration (optional)
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Text-completion endpoint configuration
///
/// When enabled, the text miner asks the endpoint to merge near-duplicate
/// RCA sentences. Disabled (the default) keeps the miner fully offline.
#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    /// Enable/disable the sentence-merge call
    #[serde(default)]
    pub enabled: bool,

    /// Endpoint URL; defaults to the OpenAI-compatible chat completions path
    pub endpoint: Option<String>,

    /// Model to request
    #[serde(default = "default_completion_model")]
    pub model: String,

    /// API key (bearer token)
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_completion_timeout")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            model: default_completion_model(),
            api_key: None,
            timeout_secs: default_completion_timeout(),
        }
    }
}

impl CompletionConfig {
    /// Check if the completion call is properly configured and enabled
    pub fn is_ready(&self) -> bool {
        self.enabled && self.api_key.is_some()
    }

    /// Endpoint URL with the default applied.
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| default_completion_endpoint().to_string())
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.api_key.is_none() {
            return Err(Error::Config(
                "completion.api_key is required when completion is enabled".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(Error::Config(
                "completion.model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_completion_endpoint() -> &'static str {
    "https://api.openai.com/v1/chat/completions"
}

fn default_completion_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_completion_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/octoboard/config.toml` (~/.config/octoboard/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("octoboard").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/octoboard/` (~/.local/state/octoboard/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("octoboard")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/octoboard/octoboard.log` (~/.local/state/octoboard/octoboard.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("octoboard.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.fields.sprint, "Sprint");
        assert_eq!(config.logging.level, "info");
        assert!(!config.completion.enabled);
        assert!(!config.completion.is_ready());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[fields]
sprint = "Iteration"
actual_days = "Spent (days)"

[completion]
enabled = true
model = "gpt-4o-mini"
api_key = "sk-test"

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.fields.sprint, "Iteration");
        assert_eq!(config.fields.actual_days, "Spent (days)");
        // unlisted keys keep their defaults
        assert_eq!(config.fields.size, "Size");
        assert!(config.completion.is_ready());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_completion_config_validation() {
        // Disabled config is always valid
        let config = CompletionConfig::default();
        assert!(config.validate().is_ok());

        // Enabled without a key should fail
        let config = CompletionConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // Enabled with a key should pass
        let config = CompletionConfig {
            enabled: true,
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.is_ready());
    }

    #[test]
    fn test_completion_endpoint_default() {
        let config = CompletionConfig::default();
        assert_eq!(
            config.resolved_endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );

        let config = CompletionConfig {
            endpoint: Some("http://localhost:11434/v1/chat/completions".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_endpoint(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fields]\nsize = \"T-Shirt\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.fields.size, "T-Shirt");

        let missing = dir.path().join("absent.toml");
        assert!(Config::load_from(&missing).is_err());
    }
}
