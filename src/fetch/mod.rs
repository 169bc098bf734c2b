// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching with bounded retries
//!
//! Each monitored target owns one `PageFetcher`, which in turn owns its
//! own HTTP client and retry policy. Transient failures (transport
//! errors, timeouts, non-2xx statuses) are retried with exponential
//! backoff; the backoff delay suspends only the calling task, so loops
//! for other targets are never stalled.

pub mod config;
pub mod fetcher;

pub use config::{FetchConfig, RetryPolicy};
pub use fetcher::{FetchError, PageFetcher};
