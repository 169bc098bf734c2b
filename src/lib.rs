// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Webpage change monitoring library
//!
//! Periodically fetches a web page, extracts its relevant text content,
//! and detects changes against the last observed snapshot via content
//! digest comparison. One independent monitoring loop runs per target.
//!
//! Key features:
//! - Retrying fetcher with exponential backoff per attempt
//! - Prioritized content extraction (readability pass, CSS selector,
//!   structural fallback chain)
//! - Digest-based change detection with unified diff rendering
//! - Adaptive loop cadence under sustained failure

pub mod config;
pub mod extract;
pub mod fetch;
pub mod monitor;

// Re-export main types
pub use config::{ConfigError, MonitorTarget};
pub use extract::{ContentExtractor, ExtractionError};
pub use fetch::{FetchConfig, FetchError, PageFetcher, RetryPolicy};
pub use monitor::{
    ChangeDetector, ChannelSink, ContentHash, LogSink, LoopState, MonitorLoop, MonitorState,
    ObservationErrorKind, ObservationResult, ObservationSink, Snapshot,
};
