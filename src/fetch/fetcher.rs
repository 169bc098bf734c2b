// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retrying HTTP fetcher
//!
//! One fetcher per monitored target; the underlying client is not
//! shared across targets.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::{FetchConfig, RetryPolicy};

/// Fetch error types
///
/// All non-2xx statuses are treated as retryable, the same as transport
/// errors; client errors (4xx) are not distinguished from server errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request timed out
    #[error("timeout fetching {url}")]
    Timeout {
        /// URL of the timed-out request
        url: String,
    },

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("transport error for {url}: {message}")]
    Transport {
        /// URL of the failed request
        url: String,
        /// Underlying error message
        message: String,
    },

    /// Non-success HTTP status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Status code returned
        status: u16,
        /// URL of the request
        url: String,
    },

    /// All retry attempts failed
    #[error("all {attempts} fetch attempts failed: {last_cause}")]
    Exhausted {
        /// Number of attempts made
        attempts: u32,
        /// Message from the final failure
        last_cause: String,
    },
}

/// HTTP fetcher with bounded retries and exponential backoff
pub struct PageFetcher {
    client: Client,
    url: String,
    policy: RetryPolicy,
}

impl PageFetcher {
    /// Create a fetcher for one target URL
    pub fn new(url: impl Into<String>, config: FetchConfig, policy: RetryPolicy) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.into(),
            policy,
        }
    }

    /// The target URL this fetcher serves
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the page body, retrying on any transient failure
    ///
    /// Makes up to `policy.max_attempts` requests. Between attempts the
    /// calling task sleeps for `min(base_delay * 2^attempt, max_delay)`;
    /// after the cap is reached the last cause is reported as
    /// `FetchError::Exhausted`.
    pub async fn fetch(&self) -> Result<String, FetchError> {
        let mut last_error: Option<FetchError> = None;

        for attempt in 0..self.policy.max_attempts {
            match self.fetch_once().await {
                Ok(body) => {
                    debug!(
                        "Fetched {} bytes from {} (attempt {}/{})",
                        body.len(),
                        self.url,
                        attempt + 1,
                        self.policy.max_attempts
                    );
                    return Ok(body);
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt + 1,
                        self.policy.max_attempts,
                        self.url,
                        e
                    );
                    last_error = Some(e);
                    if attempt + 1 < self.policy.max_attempts {
                        let delay = self.policy.delay_for_attempt(attempt);
                        debug!("Waiting {:?} before retry", delay);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(FetchError::Exhausted {
            attempts: self.policy.max_attempts,
            last_cause: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempts made".to_string()),
        })
    }

    /// One request attempt, no retries
    async fn fetch_once(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: self.url.clone(),
                }
            } else {
                FetchError::Transport {
                    url: self.url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            url: self.url.clone(),
            message: e.to_string(),
        })
    }
}

impl std::fmt::Debug for PageFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("url", &self.url)
            .field("policy", &self.policy)
            .finish()
    }
}
