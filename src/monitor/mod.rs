// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Change detection and the monitoring loop
//!
//! One cycle flows one way: fetch → extract → observe → (diff on
//! change) → sink. The loop owns its timing and a second, coarser
//! backoff layer on top of the fetcher's per-attempt retries: after
//! sustained failure the cycle interval doubles, capped at the retry
//! policy's `max_delay`.
//!
//! ```text
//! MonitorLoop → PageFetcher → ContentExtractor → ChangeDetector → ObservationSink
//!                                                     ↓
//!                                              unified_diff (on change)
//! ```

pub mod detector;
pub mod diff;
pub mod runner;
pub mod sink;
pub mod types;

pub use detector::ChangeDetector;
pub use diff::{unified_diff, UNRENDERABLE_CHANGE};
pub use runner::{LoopState, MonitorLoop};
pub use sink::{ChannelSink, LogSink, ObservationSink};
pub use types::{ContentHash, MonitorState, ObservationErrorKind, ObservationResult, Snapshot};
