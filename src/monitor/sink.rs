// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Observer boundary
//!
//! The loop emits exactly one `ObservationResult` per completed cycle
//! to a registered sink, in cycle order, never concurrently for the
//! same target. A presentation layer (status display, diff viewer)
//! attaches here; the core has no dependency on it.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{error, info};

use super::types::ObservationResult;

/// Maximum characters of content echoed into the log
const PREVIEW_CHARS: usize = 200;

/// Receives one observation per monitoring cycle
#[async_trait]
pub trait ObservationSink: Send + Sync {
    /// Called once per completed cycle for `target_url`
    async fn emit(&self, target_url: &str, result: &ObservationResult);
}

/// Sink that reports observations through the tracing subscriber
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    /// Emit the full result as a JSON line instead of prose
    json: bool,
}

impl LogSink {
    /// Human-readable log output
    pub fn new() -> Self {
        Self { json: false }
    }

    /// JSON-line log output
    pub fn json() -> Self {
        Self { json: true }
    }
}

#[async_trait]
impl ObservationSink for LogSink {
    async fn emit(&self, target_url: &str, result: &ObservationResult) {
        if self.json {
            match serde_json::to_string(result) {
                Ok(line) => info!(target_url, "{}", line),
                Err(e) => error!("Failed to serialize observation: {}", e),
            }
            return;
        }

        match result {
            ObservationResult::Initial { snapshot } => {
                info!("[{}] Initial content captured", target_url);
                info!("Content: {}...", preview(&snapshot.text));
            }
            ObservationResult::Unchanged { .. } => {
                info!("[{}] No changes detected", target_url);
            }
            ObservationResult::Changed { current, diff, .. } => {
                info!("[{}] Change detected!", target_url);
                info!("New content: {}...", preview(&current.text));
                info!("Diff:\n{}", diff);
            }
            ObservationResult::Error { kind, message } => {
                error!("[{}] Cycle failed ({:?}): {}", target_url, kind, message);
            }
        }
    }
}

/// Sink that forwards observations over an mpsc channel
///
/// Useful for embedding the monitor and for tests; a dropped receiver
/// is tolerated (the send result is discarded, matching the loop's
/// fire-and-forget contract).
pub struct ChannelSink {
    tx: mpsc::Sender<ObservationResult>,
}

impl ChannelSink {
    /// Create a sink and the receiving half, with the given buffer size
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<ObservationResult>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ObservationSink for ChannelSink {
    async fn emit(&self, _target_url: &str, result: &ObservationResult) {
        let _ = self.tx.send(result.clone()).await;
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
