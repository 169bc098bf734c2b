// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fetch configuration and retry policy

use serde::{Deserialize, Serialize};
use std::cmp;
use std::env;
use std::time::Duration;

/// Retry policy for a single fetch operation
///
/// Delay for attempt `n` (zero-based) is `base_delay * 2^n`, capped at
/// `max_delay`. The same `max_delay` also caps the monitoring loop's
/// adaptive cadence under sustained failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of request attempts before giving up
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub base_delay: Duration,
    /// Upper bound on any backoff delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Load the retry policy from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env::var("PAGEWATCH_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_attempts),
            base_delay: env::var("PAGEWATCH_RETRY_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.base_delay),
            max_delay: env::var("PAGEWATCH_MAX_BACKOFF_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.max_delay),
        }
    }

    /// Backoff delay after the given zero-based attempt index
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        cmp::min(self.base_delay.saturating_mul(factor), self.max_delay)
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Identifying user-agent attached to every request
    pub user_agent: String,
    /// Maximum redirects followed per request
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: "Custom Web Monitor Bot/1.0".to_string(),
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout: env::var("PAGEWATCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            user_agent: env::var("PAGEWATCH_USER_AGENT").unwrap_or(defaults.user_agent),
            max_redirects: env::var("PAGEWATCH_MAX_REDIRECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_redirects),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout.is_zero() {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.user_agent.is_empty() {
            return Err("User agent must not be empty".to_string());
        }
        Ok(())
    }
}
