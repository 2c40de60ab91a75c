//! TaskPlanner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::llm::LlmError;

/// Environment variable that overrides `llm.provider`
pub const PROVIDER_ENV: &str = "LLM_PROVIDER";

/// Main TaskPlanner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Log level (trace, debug, info, warn, error)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, then `.taskplanner.yml`, then the user config dir, then
    /// defaults. `LLM_PROVIDER` is applied on top of whichever was found.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_without_env(config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_without_env(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".taskplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("taskplanner").join("taskplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply environment overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(provider) = std::env::var(PROVIDER_ENV)
            && !provider.trim().is_empty()
        {
            debug!(%provider, "apply_env_overrides: provider from environment");
            self.llm.provider = provider.trim().to_string();
        }
    }
}

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Gemini,
    Anthropic,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Gemini, Provider::Anthropic];

    /// Human-readable provider name for messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Anthropic => "Anthropic",
        }
    }

    fn default_model(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("gpt-3.5-turbo"),
            // Discovered from the models endpoint at call time
            Self::Gemini => None,
            Self::Anthropic => Some("claude-sonnet-4-20250514"),
        }
    }

    fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Anthropic => "https://api.anthropic.com",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Gemini => write!(f, "gemini"),
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(format!(
                "Unknown LLM provider: '{}'. Supported: openai, gemini, anthropic",
                s
            )),
        }
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: openai, gemini or anthropic
    pub provider: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Per-provider overrides
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
    pub anthropic: ProviderConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            timeout_ms: 120_000,
            openai: ProviderConfig::default(),
            gemini: ProviderConfig::default(),
            anthropic: ProviderConfig::default(),
        }
    }
}

impl LlmConfig {
    /// Resolve the selected provider against its built-in defaults
    pub fn resolve(&self) -> Result<ResolvedLlmConfig, LlmError> {
        debug!(provider = %self.provider, "LlmConfig::resolve: called");
        let provider: Provider = self.provider.parse().map_err(LlmError::Configuration)?;

        let overrides = match provider {
            Provider::OpenAi => &self.openai,
            Provider::Gemini => &self.gemini,
            Provider::Anthropic => &self.anthropic,
        };

        Ok(ResolvedLlmConfig {
            provider,
            model: overrides
                .model
                .clone()
                .or_else(|| provider.default_model().map(str::to_string)),
            api_key_env: overrides
                .api_key_env
                .clone()
                .unwrap_or_else(|| provider.default_api_key_env().to_string()),
            base_url: overrides
                .base_url
                .clone()
                .unwrap_or_else(|| provider.default_base_url().to_string())
                .trim_end_matches('/')
                .to_string(),
            max_tokens: overrides.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: overrides.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            timeout_ms: self.timeout_ms,
        })
    }
}

const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Optional settings for one provider; unset fields take the provider default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Model identifier
    pub model: Option<String>,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

/// Fully resolved settings for the selected provider
#[derive(Debug, Clone)]
pub struct ResolvedLlmConfig {
    pub provider: Provider,
    /// `None` only for providers that discover their model
    pub model: Option<String>,
    pub api_key_env: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
}

impl ResolvedLlmConfig {
    /// Read the API key from the configured environment variable
    ///
    /// Missing, blank and template placeholder values (`your_..._here`) are
    /// rejected with a configuration error.
    pub fn get_api_key(&self) -> Result<String, LlmError> {
        debug!(api_key_env = %self.api_key_env, "get_api_key: called");
        let not_configured = || {
            LlmError::Configuration(format!(
                "{} API key not configured. Please set {} in the environment",
                self.provider.display_name(),
                self.api_key_env
            ))
        };

        let key = std::env::var(&self.api_key_env).map_err(|_| not_configured())?;
        if is_placeholder(&key) {
            debug!("get_api_key: placeholder or empty key");
            return Err(not_configured());
        }
        Ok(key.trim().to_string())
    }
}

fn is_placeholder(key: &str) -> bool {
    let key = key.trim().to_lowercase();
    key.is_empty() || (key.starts_with("your_") && key.ends_with("_here")) || key == "changeme"
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the plan store
    #[serde(rename = "plans-dir")]
    pub plans_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // XDG data directory (~/.local/share/taskplanner on Linux)
        let plans_dir = dirs::data_dir()
            .map(|d| d.join("taskplanner").join("plans"))
            .unwrap_or_else(|| PathBuf::from(".taskplanner/plans"));

        Self { plans_dir }
    }
}
