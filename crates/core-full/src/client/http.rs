//! Rate-limited blocking HTTP client for the public card APIs

use super::config::ClientConfig;
use super::{DataFetcher, ImageFetcher};
use binder_core::error::{BinderError, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, warn};

pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    last_request: Mutex<Option<Instant>>,
}

/// What one attempt produced
enum Attempt {
    Done(Option<Response>),
    Retry(String),
    Fatal(String),
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| BinderError::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            config,
            last_request: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for an API resource path
    pub fn url_for(&self, resource: &str) -> String {
        if resource.starts_with("http://") || resource.starts_with("https://") {
            return resource.to_string();
        }
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }

    /// Sleep until `min_interval` has passed since the previous request
    fn throttle(&self) {
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.config.min_interval {
                std::thread::sleep(self.config.min_interval - elapsed);
            }
        }
        *last = Some(Instant::now());
    }

    fn attempt(&self, url: &str) -> Attempt {
        self.throttle();
        match self.client.get(url).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Attempt::Done(Some(response))
                } else if status == StatusCode::NOT_FOUND {
                    Attempt::Done(None)
                } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    Attempt::Retry(format!("{} returned {}", url, status))
                } else {
                    // Other client errors will not improve on retry.
                    Attempt::Fatal(format!("{} returned {}", url, status))
                }
            }
            Err(e) => Attempt::Retry(format!("request to {} failed: {}", url, e)),
        }
    }

    /// GET with retries; `Ok(None)` on 404
    fn get(&self, url: &str) -> Result<Option<Response>> {
        let mut last_err = String::new();
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let backoff = self.config.backoff(attempt);
                warn!(
                    "{}: retry {}/{} after {:?}",
                    url, attempt, self.config.max_retries, backoff
                );
                std::thread::sleep(backoff);
            }
            match self.attempt(url) {
                Attempt::Done(response) => {
                    debug!("GET {} -> {}", url, if response.is_some() { "ok" } else { "absent" });
                    return Ok(response);
                }
                Attempt::Fatal(reason) => return Err(BinderError::http(reason)),
                Attempt::Retry(reason) => {
                    warn!("{}: attempt {} failed: {}", url, attempt + 1, reason);
                    last_err = reason;
                }
            }
        }
        Err(BinderError::http(format!(
            "giving up after {} attempts: {}",
            self.config.max_retries.saturating_add(1),
            last_err
        )))
    }
}

impl DataFetcher for HttpClient {
    fn fetch(&self, resource: &str) -> Result<Option<Value>> {
        let url = self.url_for(resource);
        let Some(response) = self.get(&url)? else {
            return Ok(None);
        };
        let text = response
            .text()
            .map_err(|e| BinderError::http(format!("Failed to read body of {}: {}", url, e)))?;
        let value = serde_json::from_str(&text).map_err(|e| {
            BinderError::http(format!(
                "Malformed JSON from {}: {}. Body starts with: {}",
                url,
                e,
                text.chars().take(200).collect::<String>()
            ))
        })?;
        Ok(Some(value))
    }
}

impl ImageFetcher for HttpClient {
    fn fetch_image(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let url = self.url_for(url);
        let Some(response) = self.get(&url)? else {
            return Ok(None);
        };
        let bytes = response
            .bytes()
            .map_err(|e| BinderError::http(format!("Failed to download {}: {}", url, e)))?;
        Ok(Some(bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        let client = HttpClient::new(
            ClientConfig::builder("https://pokeapi.co/api/v2/")
                .build()
                .unwrap(),
        )
        .unwrap();
        assert_eq!(
            client.url_for("/pokemon-species/25"),
            "https://pokeapi.co/api/v2/pokemon-species/25"
        );
        assert_eq!(
            client.url_for("https://assets.tcgdex.net/en/base/base1/44/high.png"),
            "https://assets.tcgdex.net/en/base/base1/44/high.png"
        );
    }
}
