//! Application configuration
//!
//! Configuration loaded from `.gh-pr-comment.toml`.

use anyhow::{Context, Result};
use gh_client::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration loaded from `.gh-pr-comment.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// GitHub REST API base URL (e.g. `https://ghe.example.com/api/v3`)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// How often a failed API call is retried
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Delay before the first retry in milliseconds, multiplied by the attempt number
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Upper bound of comments posted at the same time
    #[serde(default = "default_max_concurrent_posts")]
    pub max_concurrent_posts: usize,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_max_concurrent_posts() -> usize {
    4
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            max_concurrent_posts: default_max_concurrent_posts(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then the config directory, or use defaults
    ///
    /// A config file that exists but cannot be read or parsed is an error.
    pub fn load() -> Result<Self> {
        match crate::load_config_file()? {
            Some((path, content)) => {
                let config = Self::parse(&content)
                    .with_context(|| format!("Invalid config file {}", path.display()))?;
                log::info!("Loaded app config from {}", path.display());
                Ok(config)
            }
            None => {
                log::debug!("Using default app config");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file's content
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        if config.max_concurrent_posts == 0 {
            log::warn!("max_concurrent_posts must be at least 1, using 1");
            config.max_concurrent_posts = 1;
        }
        Ok(config)
    }

    /// Delay before the first retry
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
