// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Target configuration and validation
//!
//! A `MonitorTarget` describes one monitored resource: the URL, the
//! polling interval, an optional CSS selector scoping extraction, and
//! the readability-pass toggle. Validation happens at construction
//! time so that a malformed target never reaches the network layer.

pub mod target;

pub use target::{ConfigError, MonitorTarget, DEFAULT_INTERVAL_SECS};
