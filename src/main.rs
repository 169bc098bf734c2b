// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! pagewatch binary: monitor one webpage for changes from the CLI

use anyhow::{Context, Result};
use clap::Parser;
use pagewatch::config::DEFAULT_INTERVAL_SECS;
use pagewatch::{FetchConfig, LogSink, MonitorLoop, MonitorTarget, RetryPolicy};
use std::env;
use std::time::Duration;
use tokio::signal;
use tracing::info;

/// Monitor a webpage for changes
#[derive(Debug, Parser)]
#[command(name = "pagewatch", version, about)]
struct Args {
    /// URL to monitor
    #[arg(long, env = "PAGEWATCH_URL", default_value = "https://example.com")]
    url: String,

    /// Monitoring interval in seconds
    #[arg(long, env = "PAGEWATCH_INTERVAL_SECS", default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: u64,

    /// CSS selector to monitor a specific element
    #[arg(long)]
    selector: Option<String>,

    /// Use the readability pass for content extraction
    #[arg(long)]
    use_readability: bool,

    /// Log each observation as a JSON line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut target = MonitorTarget::new(args.url, Duration::from_secs(args.interval))
        .context("invalid monitor target")?;
    if let Some(selector) = args.selector {
        target = target
            .with_selector(selector)
            .context("invalid monitor target")?;
    }
    let target = target.with_readability(args.use_readability);

    let fetch_config = FetchConfig::from_env();
    fetch_config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid fetch configuration")?;

    let mut monitor = MonitorLoop::new(target, fetch_config, RetryPolicy::from_env())
        .context("invalid monitor target")?;

    let sink = if args.json {
        Box::new(LogSink::json())
    } else {
        Box::new(LogSink::new())
    };
    monitor.start(sink).await;

    signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Monitoring stopped by user");

    monitor.stop().await;
    monitor.join().await;
    Ok(())
}
