//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use crate::http::DEFAULT_API_BASE_URL;
use regchat_application::BehaviorConfig;
use regchat_domain::{DomainError, OutputFormat, RegulatoryDomain, RetrievalOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export OutputFormat from domain for convenience
pub use regchat_domain::OutputFormat as FileOutputFormat;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("api.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("api.base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("invalid [chat] settings: {0}")]
    InvalidRetrieval(#[from] DomainError),
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL of the backend, `/chat` is appended
    pub base_url: String,
    /// Per-request timeout; unset waits indefinitely
    pub timeout_seconds: Option<u64>,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

/// Query defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Domain selected at startup
    pub domain: RegulatoryDomain,
    pub top_k: Option<u8>,
    pub min_score: Option<f32>,
}

impl FileChatConfig {
    pub fn retrieval_options(&self) -> RetrievalOptions {
        RetrievalOptions {
            top_k: self.top_k,
            min_score: self.min_score,
        }
    }
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while waiting for the backend
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Log sinks besides stderr
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the daily-rotated diagnostic log
    pub directory: Option<String>,
    /// JSONL audit file of every query
    pub conversation_log: Option<String>,
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api: FileApiConfig,
    pub chat: FileChatConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(base_url.to_string()));
        }

        self.chat.retrieval_options().validate()?;
        Ok(())
    }

    /// Behavior settings for the use cases
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.api.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.api.timeout_seconds.is_none());
        assert_eq!(config.chat.domain, RegulatoryDomain::Pix);
        assert!(config.chat.retrieval_options().is_empty());
        assert!(config.output.format.is_none());
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(config.logging.conversation_log.is_none());
        assert!(config.validate().is_ok());
        assert!(config.behavior().timeout.is_none());
    }

    #[test]
    fn test_deserialize_toml() {
        let toml_str = r#"
[api]
base_url = "https://regchat.example.com"
timeout_seconds = 60

[chat]
domain = "open_finance"
top_k = 5
min_score = 0.7

[output]
format = "answer"
color = false

[repl]
show_progress = false
history_file = "/tmp/regchat-history.txt"

[logging]
directory = "logs"
conversation_log = "audit.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://regchat.example.com");
        assert_eq!(config.chat.domain, RegulatoryDomain::OpenFinance);
        assert_eq!(config.chat.top_k, Some(5));
        assert_eq!(config.output.format, Some(OutputFormat::Answer));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(config.logging.directory.as_deref(), Some("logs"));
        assert!(config.validate().is_ok());
        assert_eq!(config.behavior().timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FileConfig = toml::from_str("[chat]\ndomain = \"pix\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = FileConfig::default();
        config.api.timeout_seconds = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = FileConfig::default();
        config.api.base_url = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyBaseUrl)
        ));

        config.api.base_url = "localhost:8000".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_validate_rejects_retrieval_out_of_range() {
        let mut config = FileConfig::default();
        config.chat.top_k = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRetrieval(DomainError::InvalidTopK(0)))
        ));
    }
}
