// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Monitor target definition and validation

use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Default polling interval in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Errors raised while building a monitor target
///
/// These are fatal configuration errors. A loop is never started for an
/// invalid target, and none of them trigger a retry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL did not parse as an absolute URL with scheme and host
    #[error("invalid target URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL string
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// CSS selector failed to parse
    #[error("invalid CSS selector '{0}'")]
    InvalidSelector(String),

    /// Polling interval of zero would spin the loop
    #[error("monitor interval must be greater than zero")]
    ZeroInterval,
}

/// Describes one monitored resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorTarget {
    /// Absolute URL to monitor
    pub url: String,
    /// Delay between monitoring cycles
    pub interval: Duration,
    /// Optional CSS selector scoping extraction to one element
    pub selector: Option<String>,
    /// Whether the readability extraction pass runs first
    pub use_readability: bool,
}

impl MonitorTarget {
    /// Build a validated target
    ///
    /// Fails fast on a malformed URL, a zero interval, or an unparsable
    /// selector, before any network activity happens.
    pub fn new(url: impl Into<String>, interval: Duration) -> Result<Self, ConfigError> {
        let target = Self {
            url: url.into(),
            interval,
            selector: None,
            use_readability: false,
        };
        target.validate()?;
        Ok(target)
    }

    /// Scope extraction to the first element matching `selector`
    pub fn with_selector(mut self, selector: impl Into<String>) -> Result<Self, ConfigError> {
        let selector = selector.into();
        if Selector::parse(&selector).is_err() {
            return Err(ConfigError::InvalidSelector(selector));
        }
        self.selector = Some(selector);
        Ok(self)
    }

    /// Enable the readability extraction pass
    pub fn with_readability(mut self, enabled: bool) -> Self {
        self.use_readability = enabled;
        self
    }

    /// Validate the target
    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.url).map_err(|e| ConfigError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(ConfigError::InvalidUrl {
                url: self.url.clone(),
                reason: "missing host".to_string(),
            });
        }
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if let Some(ref selector) = self.selector {
            if Selector::parse(selector).is_err() {
                return Err(ConfigError::InvalidSelector(selector.clone()));
            }
        }
        Ok(())
    }
}
