// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-target monitoring loop

use std::cmp;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::{ConfigError, MonitorTarget};
use crate::extract::ContentExtractor;
use crate::fetch::{FetchConfig, PageFetcher, RetryPolicy};

use super::detector::ChangeDetector;
use super::sink::ObservationSink;
use super::types::{ObservationErrorKind, ObservationResult};

/// Lifecycle of a monitoring loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, not yet started
    Idle,
    /// Cycles are running
    Running,
    /// Stop requested, current cycle allowed to finish
    Stopping,
    /// Loop task has terminated
    Stopped,
}

/// Scheduler tying fetch, extraction, and detection together on a
/// timed cadence
///
/// One loop per target; cycles are strictly sequential, so there is at
/// most one fetch in flight per target and results reach the sink in
/// cycle order. Delays suspend only this loop's task.
pub struct MonitorLoop {
    target: MonitorTarget,
    fetch_config: FetchConfig,
    policy: RetryPolicy,
    is_running: Arc<RwLock<bool>>,
    started: bool,
    handle: Option<JoinHandle<()>>,
}

impl MonitorLoop {
    /// Create a loop for a target, validating it first
    ///
    /// A malformed target URL is a fatal configuration error; the loop
    /// never starts and no network activity happens.
    pub fn new(
        target: MonitorTarget,
        fetch_config: FetchConfig,
        policy: RetryPolicy,
    ) -> Result<Self, ConfigError> {
        target.validate()?;
        Ok(Self {
            target,
            fetch_config,
            policy,
            is_running: Arc::new(RwLock::new(false)),
            started: false,
            handle: None,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> LoopState {
        if !self.started {
            return LoopState::Idle;
        }
        // Blocking read for simplicity in tests
        let running = futures::executor::block_on(async { *self.is_running.read().await });
        if running {
            return LoopState::Running;
        }
        match &self.handle {
            None => LoopState::Stopped,
            Some(handle) if handle.is_finished() => LoopState::Stopped,
            Some(_) => LoopState::Stopping,
        }
    }

    /// Spawn the loop task
    ///
    /// No-op if already started.
    pub async fn start(&mut self, sink: Box<dyn ObservationSink>) {
        if self.started {
            return;
        }
        self.started = true;
        *self.is_running.write().await = true;

        let worker = LoopWorker {
            fetcher: PageFetcher::new(
                self.target.url.clone(),
                self.fetch_config.clone(),
                self.policy.clone(),
            ),
            extractor: ContentExtractor::new(
                self.target.selector.clone(),
                self.target.use_readability,
            ),
            detector: ChangeDetector::new(),
            url: self.target.url.clone(),
            interval: self.target.interval,
            policy: self.policy.clone(),
            is_running: self.is_running.clone(),
            sink,
        };
        self.handle = Some(tokio::spawn(worker.run()));
    }

    /// Request the loop to stop
    ///
    /// Idempotent. The signal is observed no later than the next
    /// sleep-or-fetch boundary; an in-flight fetch attempt is allowed
    /// to complete.
    pub async fn stop(&mut self) {
        *self.is_running.write().await = false;
    }

    /// Wait for the loop task to terminate
    pub async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// State moved into the spawned loop task
struct LoopWorker {
    fetcher: PageFetcher,
    extractor: ContentExtractor,
    detector: ChangeDetector,
    url: String,
    interval: Duration,
    policy: RetryPolicy,
    is_running: Arc<RwLock<bool>>,
    sink: Box<dyn ObservationSink>,
}

impl LoopWorker {
    async fn run(mut self) {
        info!("Starting to monitor {}", self.url);
        info!("Checking every {:?}", self.interval);

        while *self.is_running.read().await {
            let result = self.run_cycle().await;
            if result.is_error() {
                let failures = self.detector.record_error();
                warn!("{} consecutive failed cycles for {}", failures, self.url);
            }
            self.sink.emit(&self.url, &result).await;

            let delay = self.cycle_delay();
            if !*self.is_running.read().await {
                break;
            }
            tokio::time::sleep(delay).await;
        }

        info!("Monitoring stopped for {}", self.url);
    }

    /// One fetch-extract-compare pass
    async fn run_cycle(&mut self) -> ObservationResult {
        let html = match self.fetcher.fetch().await {
            Ok(html) => html,
            Err(e) => {
                return ObservationResult::Error {
                    kind: ObservationErrorKind::Fetch,
                    message: e.to_string(),
                }
            }
        };

        match self.extractor.extract(&html) {
            Ok(text) => self.detector.observe(text),
            Err(e) => ObservationResult::Error {
                kind: ObservationErrorKind::Extraction,
                message: e.to_string(),
            },
        }
    }

    /// Sleep before the next cycle, doubled under sustained failure
    ///
    /// Once consecutive failures exceed the fetch layer's attempt cap,
    /// the interval for that cycle doubles, capped at the retry
    /// policy's `max_delay` but never shorter than the configured
    /// interval. This is loop-level backpressure, separate from the
    /// fetcher's per-attempt backoff.
    fn cycle_delay(&self) -> Duration {
        if self.detector.consecutive_errors() > self.policy.max_attempts {
            let doubled = cmp::min(self.interval.saturating_mul(2), self.policy.max_delay);
            let backed_off = cmp::max(self.interval, doubled);
            warn!(
                "Sustained failures for {}, backing off to {:?}",
                self.url, backed_off
            );
            backed_off
        } else {
            self.interval
        }
    }
}
