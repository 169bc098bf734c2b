// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Digest-based change detection

use tracing::debug;

use super::diff::unified_diff;
use super::types::{ContentHash, MonitorState, ObservationResult, Snapshot};

/// Classifies each new observation against the last known snapshot
///
/// Owns the per-target `MonitorState`. The transition depends only on
/// digest equality, never on text length or content.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    state: MonitorState,
}

impl ChangeDetector {
    /// Create a detector with no prior snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a newly extracted text
    ///
    /// Resets the consecutive error count: reaching this point means the
    /// cycle succeeded. Failed cycles go through `record_error` instead
    /// and leave `last_snapshot` untouched, so the next success is still
    /// compared against the last real snapshot.
    pub fn observe(&mut self, text: String) -> ObservationResult {
        self.state.consecutive_errors = 0;
        let hash = ContentHash::digest(&text);

        let Some(previous) = self.state.last_snapshot.take() else {
            let snapshot = Snapshot::capture(text);
            debug!("Initial snapshot captured ({})", snapshot.hash);
            self.state.last_snapshot = Some(snapshot.clone());
            return ObservationResult::Initial { snapshot };
        };

        if hash == previous.hash {
            self.state.last_snapshot = Some(previous.clone());
            return ObservationResult::Unchanged { snapshot: previous };
        }

        let current = Snapshot::capture(text);
        debug!("Content changed: {} -> {}", previous.hash, current.hash);
        self.state.last_snapshot = Some(current.clone());
        let diff = unified_diff(&previous.text, &current.text);
        ObservationResult::Changed {
            previous,
            current,
            diff,
        }
    }

    /// Record a failed cycle, returning the new consecutive error count
    pub fn record_error(&mut self) -> u32 {
        self.state.consecutive_errors += 1;
        self.state.consecutive_errors
    }

    /// Consecutive failed cycles since the last success
    pub fn consecutive_errors(&self) -> u32 {
        self.state.consecutive_errors
    }

    /// The last accepted snapshot, if any
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.state.last_snapshot.as_ref()
    }
}
