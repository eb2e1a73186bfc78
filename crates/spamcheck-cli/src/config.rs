//! Run configuration

use serde::{Deserialize, Serialize};
use spamcheck_classifiers::{
    ChatServiceConfig, RequestQuota, RetryPolicy, DEFAULT_ENDPOINT, DEFAULT_MODEL,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Classification service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Request quota
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// CSV file with the documents to classify
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    /// Directory receiving results, reports and metric snapshots
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        let mut config = Self::from_file(config_path)?;

        if let Some(input) = &cli.input {
            config.input_path = input.clone();
        }

        if let Some(output_dir) = &cli.output_dir {
            config.output_dir = output_dir.clone();
        }

        if let Some(model) = &cli.model {
            config.service.model = model.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file, or use defaults when it does not exist
    pub fn from_file(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = config_path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| spamcheck_core::Error::config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Reject settings the scheduler cannot honor
    pub fn validate(&self) -> spamcheck_core::Result<()> {
        use spamcheck_core::Error;

        if self.rate_limit.window_capacity == 0 {
            return Err(Error::config("rate_limit.window_capacity must be at least 1"));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(Error::config("rate_limit.window_secs must be greater than 0"));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(Error::config(format!(
                "retry.base_delay_ms ({}) exceeds retry.max_delay_ms ({})",
                self.retry.base_delay_ms, self.retry.max_delay_ms
            )));
        }
        if self.service.timeout_secs == 0 {
            return Err(Error::config("service.timeout_secs must be greater than 0"));
        }
        if self.service.model.trim().is_empty() {
            return Err(Error::config("service.model is empty"));
        }

        Ok(())
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> spamcheck_core::Result<String> {
        match std::env::var(&self.service.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(spamcheck_core::Error::config(format!(
                "{} is not set (add it to the environment or a .env file)",
                self.service.api_key_env
            ))),
        }
    }

    /// Client settings for the chat completions service
    pub fn chat_service(&self, api_key: String) -> ChatServiceConfig {
        ChatServiceConfig {
            endpoint: self.service.endpoint.clone(),
            model: self.service.model.clone(),
            api_key,
            temperature: self.service.temperature,
            max_tokens: self.service.max_tokens,
            timeout: self.service.timeout(),
        }
    }

    pub fn quota(&self) -> RequestQuota {
        RequestQuota::new(
            self.rate_limit.window_capacity,
            Duration::from_secs(self.rate_limit.window_secs),
        )
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry.max_retries,
            base_delay: Duration::from_millis(self.retry.base_delay_ms),
            max_delay: Duration::from_millis(self.retry.max_delay_ms),
            timeout: self.service.timeout(),
        }
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit.min_interval_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
            input_path: default_input_path(),
            output_dir: default_output_dir(),
        }
    }
}

/// Classification service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// OpenAI-compatible base URL
    pub endpoint: String,

    pub model: String,

    /// Environment variable holding the bearer token
    pub api_key_env: String,

    pub temperature: f32,

    pub max_tokens: u32,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            temperature: 0.0,
            max_tokens: 1000,
            timeout_secs: 30,
        }
    }
}

/// Request quota settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub window_capacity: u32,

    pub window_secs: u64,

    /// Minimum spacing between consecutive requests
    pub min_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_capacity: 30,
            window_secs: 60,
            min_interval_ms: 1000,
        }
    }
}

/// Retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
        }
    }
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data/content.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}
