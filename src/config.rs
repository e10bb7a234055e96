//! Configuration management for the Viajeros AI service
//!
//! Handles loading configuration from an optional TOML file, `VIAJEROS__*`
//! environment variables and the plain variables older deployments use
//! (`AI_PROVIDER`, `USE_MOCK_AI`, `CLAUDE_API_KEY`, `PORT`), and validates
//! the result.

use crate::TravelAiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Credential value shipped in sample env files. Treated as "no credential".
pub const API_KEY_PLACEHOLDER: &str = "sk-ant-api03-tu_clave_aqui";

/// Shown in place of credentials in `Debug` output
pub const REDACTED: &str = "[redacted]";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelAiConfig {
    /// Plan provider selection and credentials
    pub ai: AiConfig,
    /// HTTP server settings
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Plan provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Provider name (`claude`, `openai`)
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Force the mock provider even when a credential is configured
    #[serde(default)]
    pub use_mock: bool,
    /// Language model API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Credential value that means "not configured"
    #[serde(default = "default_api_key_placeholder")]
    pub api_key_placeholder: String,
    /// Model identifier sent to the language model API
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the language model API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Output budget for a generated plan
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Artificial latency of the mock provider in milliseconds
    #[serde(default = "default_mock_delay")]
    pub mock_delay_ms: u64,
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("provider", &self.provider)
            .field("use_mock", &self.use_mock)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("mock_delay_ms", &self.mock_delay_ms)
            .finish_non_exhaustive()
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body in KiB
    #[serde(default = "default_body_limit")]
    pub body_limit_kb: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_provider() -> String {
    "claude".to_string()
}

fn default_api_key_placeholder() -> String {
    API_KEY_PLACEHOLDER.to_string()
}

fn default_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_timeout() -> u32 {
    60
}

fn default_mock_delay() -> u64 {
    1500
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_body_limit() -> usize {
    64
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            use_mock: false,
            api_key: None,
            api_key_placeholder: default_api_key_placeholder(),
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout(),
            mock_delay_ms: default_mock_delay(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_kb: default_body_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AiConfig {
    /// Mock configuration with the given delay, used by tests and demos
    #[must_use]
    pub fn mock(delay: Duration) -> Self {
        Self {
            use_mock: true,
            mock_delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }

    /// The credential, if one is set and it is not the placeholder
    #[must_use]
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty() && *key != self.api_key_placeholder)
    }

    /// Whether the mock provider should stand in for the real one
    #[must_use]
    pub fn wants_mock(&self) -> bool {
        self.use_mock || self.usable_api_key().is_none()
    }
}

impl ServerConfig {
    #[must_use]
    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_kb.saturating_mul(1024)
    }
}

impl TravelAiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            let local = PathBuf::from("viajeros.toml");
            if local.exists() {
                local
            } else {
                Self::get_config_path().unwrap_or(local)
            }
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // VIAJEROS__AI__PROVIDER=claude, VIAJEROS__SERVER__PORT=8080, ...
        builder = builder.add_source(
            Environment::with_prefix("VIAJEROS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder = builder
            .set_override_option("ai.provider", env::var("AI_PROVIDER").ok())?
            .set_override_option(
                "ai.use_mock",
                env::var("USE_MOCK_AI").ok().map(|flag| flag == "true"),
            )?
            .set_override_option("ai.api_key", env::var("CLAUDE_API_KEY").ok())?
            .set_override_option(
                "server.port",
                env::var("PORT")
                    .ok()
                    .and_then(|port| port.parse::<i64>().ok()),
            )?;

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("viajeros").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.ai.provider.trim().is_empty() {
            self.ai.provider = default_provider();
        }
        if self.ai.api_key_placeholder.is_empty() {
            self.ai.api_key_placeholder = default_api_key_placeholder();
        }
        if self.ai.model.is_empty() {
            self.ai.model = default_model();
        }
        if self.ai.base_url.is_empty() {
            self.ai.base_url = default_base_url();
        }
        if self.ai.max_tokens == 0 {
            self.ai.max_tokens = default_max_tokens();
        }
        if self.ai.timeout_seconds == 0 {
            self.ai.timeout_seconds = default_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.body_limit_kb == 0 {
            self.server.body_limit_kb = default_body_limit();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.ai.timeout_seconds > 300 {
            return Err(
                TravelAiError::config("AI request timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.ai.max_tokens > 8192 {
            return Err(TravelAiError::config("AI max tokens cannot exceed 8192").into());
        }

        if self.ai.mock_delay_ms > 60_000 {
            return Err(
                TravelAiError::config("Mock provider delay cannot exceed 60000 ms").into(),
            );
        }

        if self.server.body_limit_kb > 10 * 1024 {
            return Err(
                TravelAiError::config("Request body limit cannot exceed 10240 KiB").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelAiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.ai.base_url.starts_with("http://") && !self.ai.base_url.starts_with("https://")
        {
            return Err(
                TravelAiError::config("AI base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}
