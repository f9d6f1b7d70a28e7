//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use clausewise_llm::{gemini, ollama};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Blob cache settings
    #[serde(default)]
    pub cache: CacheSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// Which model backend to call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Generative Language API
    #[default]
    Gemini,
    /// Local Ollama server
    Ollama,
}

/// Model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Backend
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model name; the provider's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API base URL; the provider's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Resolved API key; never read from or written to the file
    #[serde(skip)]
    pub api_key: Option<String>,
}

/// Blob cache settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Directory backing `--key` lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    #[default]
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".clausewise").join("config.toml"))
    }

    /// Load configuration and resolve the API key from the environment.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.llm.api_key = std::env::var(&config.llm.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Check the model settings before any request is made.
    pub fn validate(&self) -> Result<()> {
        if let Some(model) = &self.llm.model {
            if model.trim().is_empty() {
                return Err(CliError::Config("llm.model must not be empty".into()));
            }
        }
        if self.llm.timeout_secs == 0 {
            return Err(CliError::Config("llm.timeout_secs must be greater than 0".into()));
        }
        if self.llm.provider == ProviderKind::Gemini && self.llm.api_key.is_none() {
            return Err(CliError::Config(format!(
                "Gemini requires an API key: set {} or pass --api-key",
                self.llm.api_key_env
            )));
        }
        Ok(())
    }
}

impl LlmSettings {
    /// Configured model, or the provider's default.
    pub fn model(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) => model,
            (None, ProviderKind::Gemini) => gemini::DEFAULT_MODEL,
            (None, ProviderKind::Ollama) => ollama::DEFAULT_MODEL,
        }
    }

    /// Configured endpoint, or the provider's default.
    pub fn endpoint(&self) -> &str {
        match (&self.endpoint, self.provider) {
            (Some(endpoint), _) => endpoint,
            (None, ProviderKind::Gemini) => gemini::DEFAULT_ENDPOINT,
            (None, ProviderKind::Ollama) => ollama::DEFAULT_ENDPOINT,
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            endpoint: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    gemini::DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}
