// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for change detection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 digest of extracted text, stored as lowercase hex
///
/// Equality of digests stands in for equality of texts; a collision is
/// treated as unchanged, an accepted approximation of digest-based
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentHash(String);

impl ContentHash {
    /// Digest the given text
    ///
    /// Deterministic: the same text always produces the same digest.
    pub fn digest(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex form of the digest
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The last observed state of a target's content
///
/// Immutable once created; the detector replaces it wholesale on each
/// accepted observation. The text is retained (not just the digest)
/// because rendering a diff needs the previous text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Extracted canonical text
    pub text: String,
    /// Digest of `text`
    pub hash: ContentHash,
    /// When the observation was taken
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Capture a snapshot of the given text, digesting it now
    ///
    /// The only constructor, so a snapshot's hash is always the digest
    /// of its own text.
    pub fn capture(text: String) -> Self {
        let hash = ContentHash::digest(&text);
        Self {
            text,
            hash,
            captured_at: Utc::now(),
        }
    }
}

/// Which stage of the cycle failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObservationErrorKind {
    /// All fetch attempts were exhausted
    Fetch,
    /// The document yielded no extractable content
    Extraction,
}

/// Outcome of one monitoring cycle
///
/// Constructed once per cycle and handed to the sink immediately;
/// replaces the dynamic status/message dictionary of ad-hoc monitors
/// with an exhaustiveness-checked variant.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ObservationResult {
    /// First successful observation for this target
    Initial {
        /// The captured snapshot
        snapshot: Snapshot,
    },
    /// Digest equals the previous snapshot's
    Unchanged {
        /// The retained snapshot (unchanged)
        snapshot: Snapshot,
    },
    /// Digest differs from the previous snapshot's
    Changed {
        /// Snapshot before the change
        previous: Snapshot,
        /// Snapshot after the change
        current: Snapshot,
        /// Unified diff of previous vs current text
        diff: String,
    },
    /// Fetch or extraction failed for this cycle
    Error {
        /// Failing stage
        kind: ObservationErrorKind,
        /// Human-readable cause
        message: String,
    },
}

impl ObservationResult {
    /// Whether this cycle failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Short status label, mirroring the classic monitor output
    pub fn status(&self) -> &'static str {
        match self {
            Self::Initial { .. } => "initial",
            Self::Unchanged { .. } => "unchanged",
            Self::Changed { .. } => "changed",
            Self::Error { .. } => "error",
        }
    }
}

/// Per-target mutable monitoring state
///
/// Owned and mutated only by the detector: `last_snapshot` is replaced
/// on each accepted observation, `consecutive_errors` is bumped by
/// `record_error` and reset to zero by any successful observation.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    /// Last accepted snapshot, if any
    pub last_snapshot: Option<Snapshot>,
    /// Number of consecutive cycles that ended in an error
    pub consecutive_errors: u32,
}
