//! Configuration loading and validation for reagent.
//!
//! Loads configuration from `~/.reagent/config.toml` when present, then
//! applies environment variable overrides. Credentials come only from the
//! environment:
//!
//! - `OPENAI_API_KEY`: required before the agent can make any model call
//! - `TAVILY_API_KEY`: optional; when absent, the web search tool degrades
//!   to a placeholder response instead of failing

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Agent configuration. Immutable after construction.
#[derive(Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model identifier sent to the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Whether the calculator tool is registered
    #[serde(default)]
    pub include_calculator: bool,

    /// Whether to print each reasoning step as it happens
    #[serde(default)]
    pub verbose: bool,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per model response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Safety limit on reasoning iterations per turn
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Override the provider API base URL (e.g. for a local endpoint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_iterations() -> u32 {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            include_calculator: false,
            verbose: false,
            temperature: default_temperature(),
            max_tokens: None,
            max_iterations: default_max_iterations(),
            api_base_url: None,
        }
    }
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentConfig")
            .field("model", &self.model)
            .field("include_calculator", &self.include_calculator)
            .field("verbose", &self.verbose)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_iterations", &self.max_iterations)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl AgentConfig {
    /// Load configuration from the default path (~/.reagent/config.toml)
    /// with environment variable overrides.
    ///
    /// Env overrides: `REAGENT_MODEL` replaces the configured model.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(model) = std::env::var("REAGENT_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".reagent")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// API credentials read from the environment. Never serialized.
#[derive(Clone)]
pub struct Credentials {
    /// Model provider key (`OPENAI_API_KEY`). Required for live runs.
    pub openai_api_key: Option<String>,

    /// Web search provider key (`TAVILY_API_KEY`). Optional; absence
    /// selects the placeholder search implementation.
    pub tavily_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            tavily_api_key: non_empty_var("TAVILY_API_KEY"),
        }
    }

    /// The model provider key, or a configuration error naming the
    /// missing variable.
    pub fn require_openai_key(&self) -> Result<&str, ConfigError> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            ConfigError::MissingCredential {
                var: "OPENAI_API_KEY".into(),
            }
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("tavily_api_key", &redact(&self.tavily_api_key))
            .finish()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Environment variable {var} is not set")]
    MissingCredential { var: String },
}
