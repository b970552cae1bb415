//! HTTP client settings.
//!
//! Retry strategy: 429, 5xx and transport errors are retried up to
//! `max_retries` times, waiting `retry_backoff_ms * 2^(attempt-1)` before each
//! retry. Independently, consecutive requests are spaced by at least
//! `min_interval_ms` to stay under public API rate limits.

use binder_core::config::constants;
use binder_core::error::{BinderError, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub min_interval: Duration,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            user_agent: constants::USER_AGENT.to_string(),
            min_interval: Duration::from_millis(constants::DEFAULT_MIN_INTERVAL_MS),
            max_retries: constants::DEFAULT_MAX_RETRIES,
            retry_backoff_ms: constants::DEFAULT_RETRY_BACKOFF_MS,
            timeout: Duration::from_secs(constants::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: ClientConfig {
                base_url: base_url.into(),
                ..Default::default()
            },
        }
    }

    /// Settings for PokeAPI
    pub fn pokeapi() -> Self {
        Self {
            base_url: constants::POKEAPI_BASE_URL.to_string(),
            ..Default::default()
        }
    }

    /// Settings for TCGdex
    pub fn tcgdex() -> Self {
        Self {
            base_url: constants::TCGDEX_BASE_URL.to_string(),
            ..Default::default()
        }
    }

    /// Wait before retry number `attempt` (1-based), saturating instead of overflowing
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u64
            .checked_pow(attempt.saturating_sub(1))
            .unwrap_or(u64::MAX);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    pub fn min_interval_ms(mut self, ms: u64) -> Self {
        self.config.min_interval = Duration::from_millis(ms);
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout = Duration::from_secs(secs);
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let base = self.config.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(BinderError::invalid_config(format!(
                "client base URL must be http(s), got '{}'",
                self.config.base_url
            )));
        }
        if self.config.timeout.is_zero() {
            return Err(BinderError::invalid_config("client timeout must be positive"));
        }
        if self.config.max_retries > constants::MAX_RETRIES_LIMIT {
            return Err(BinderError::invalid_config(format!(
                "client max_retries must be at most {}, got {}",
                constants::MAX_RETRIES_LIMIT,
                self.config.max_retries
            )));
        }
        Ok(self.config)
    }
}
