//! Configuration management for LifeLoom
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (LIFELOOM_*)
//! 3. Config file (~/.config/lifeloom/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default Groq chat completions endpoint (OpenAI-compatible)
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model served by Groq
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// LLM provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent to the provider
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Chat completions endpoint
    pub api_url: String,

    /// HTTP request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// LLM configuration
    pub llm: LlmConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/lifeloom/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lifeloom").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - LIFELOOM_MODEL: Model to use
    /// - LIFELOOM_TEMPERATURE: Sampling temperature
    /// - LIFELOOM_API_URL: Chat completions endpoint
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(model) = std::env::var("LIFELOOM_MODEL") {
            self.llm.model = model;
        }

        if let Ok(temperature) = std::env::var("LIFELOOM_TEMPERATURE") {
            self.llm.temperature = parse_temperature(&temperature)?;
        }

        if let Ok(api_url) = std::env::var("LIFELOOM_API_URL") {
            self.llm.api_url = api_url;
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    ///
    /// The temperature is range-checked the same way as `LIFELOOM_TEMPERATURE`.
    pub fn with_cli_overrides(
        mut self,
        model: Option<String>,
        temperature: Option<f32>,
    ) -> Result<Self> {
        if let Some(m) = model {
            self.llm.model = m;
        }

        if let Some(t) = temperature {
            self.llm.temperature = check_temperature(t)?;
        }

        Ok(self)
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(model: Option<String>, temperature: Option<f32>) -> Result<Self> {
        Self::load()?
            .with_env_overrides()?
            .with_cli_overrides(model, temperature)
    }
}

fn parse_temperature(value: &str) -> Result<f32> {
    let temperature: f32 = value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid temperature: {}", value)))?;

    check_temperature(temperature)
}

fn check_temperature(temperature: f32) -> Result<f32> {
    if !(0.0..=2.0).contains(&temperature) {
        return Err(Error::Config(format!(
            "Temperature {} out of range (0.0 - 2.0)",
            temperature
        )));
    }

    Ok(temperature)
}
