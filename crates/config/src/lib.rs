//! Configuration loading, validation, and management for CampusDesk.
//!
//! Loads configuration from `~/.campusdesk/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.campusdesk/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the language model / embedding endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Embedding model
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per LLM response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Knowledge base settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Assistant persona
    #[serde(default)]
    pub identity: IdentityConfig,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_embedding_model() -> String {
    "text-embedding-3-small".into()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    1024
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("embedding_model", &self.embedding_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("agent", &self.agent)
            .field("knowledge", &self.knowledge)
            .field("identity", &self.identity)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum agent↔tools round trips per chat
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Timeout for one language model call
    #[serde(default = "default_model_timeout")]
    pub model_timeout_secs: u64,

    /// Timeout for one tool execution
    #[serde(default = "default_tool_timeout")]
    pub tool_timeout_secs: u64,

    /// Answer returned when the round-trip bound is hit
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

fn default_max_iterations() -> u32 {
    10
}
fn default_model_timeout() -> u64 {
    60
}
fn default_tool_timeout() -> u64 {
    30
}
fn default_fallback_message() -> String {
    "I'm sorry, I couldn't complete that request. Please try rephrasing or breaking it into smaller steps.".into()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            model_timeout_secs: default_model_timeout(),
            tool_timeout_secs: default_tool_timeout(),
            fallback_message: default_fallback_message(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON file with knowledge documents and menus (CLI only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,

    /// Results returned per knowledge search
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Timeout for one embedding call
    #[serde(default = "default_embedding_timeout")]
    pub embedding_timeout_secs: u64,

    /// Timeout for reading the knowledge store
    #[serde(default = "default_source_timeout")]
    pub source_timeout_secs: u64,
}

fn default_top_k() -> usize {
    3
}
fn default_embedding_timeout() -> u64 {
    30
}
fn default_source_timeout() -> u64 {
    30
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            seed_file: None,
            top_k: default_top_k(),
            embedding_timeout_secs: default_embedding_timeout(),
            source_timeout_secs: default_source_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Replace the built-in instructions (capabilities and date are still appended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions_override: Option<String>,
}

fn default_assistant_name() -> String {
    "CampusDesk".into()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            instructions_override: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.campusdesk/config.toml).
    ///
    /// Also checks environment variables:
    /// - `CAMPUSDESK_API_KEY` (highest priority), then `OPENAI_API_KEY`
    /// - `CAMPUSDESK_MODEL`
    /// - `CAMPUSDESK_BASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
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

    /// Apply environment overrides using the given lookup.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if self.api_key.is_none() {
            self.api_key = var("CAMPUSDESK_API_KEY").or_else(|| var("OPENAI_API_KEY"));
        }
        if let Some(model) = var("CAMPUSDESK_MODEL") {
            self.default_model = model;
        }
        if let Some(url) = var("CAMPUSDESK_BASE_URL") {
            self.base_url = url;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".campusdesk")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }
        if self.agent.model_timeout_secs == 0
            || self.agent.tool_timeout_secs == 0
            || self.knowledge.embedding_timeout_secs == 0
            || self.knowledge.source_timeout_secs == 0
        {
            return Err(ConfigError::ValidationError("timeouts must be > 0".into()));
        }
        if self.knowledge.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "knowledge.top_k must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_model: default_model(),
            embedding_model: default_embedding_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            agent: AgentConfig::default(),
            knowledge: KnowledgeConfig::default(),
            identity: IdentityConfig::default(),
        }
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
}
