// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch command: run the usage monitor until interrupted

use crate::output::{self, OutputFormat};
use anyhow::Result;
use rctx_core::Arbiter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

#[derive(clap::Args)]
pub struct WatchArgs {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured sample interval (e.g. "5s", "500ms")
    #[arg(long, value_parser = humantime::parse_duration)]
    interval: Option<Duration>,

    /// Override the configured max_resources
    #[arg(long)]
    max: Option<usize>,

    /// Report this count instead of probing /dev/dri (dry run)
    #[arg(long)]
    fixed: Option<usize>,

    /// Stop after this long instead of waiting for Ctrl-C
    #[arg(long = "for", value_parser = humantime::parse_duration)]
    run_for: Option<Duration>,

    /// Format of the final snapshot printed on exit
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub async fn handle(args: WatchArgs) -> Result<ExitCode> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(interval) = args.interval {
        config = config.with_sample_interval(interval);
    }
    if let Some(max) = args.max {
        config = config.with_max_resources(max);
    }

    let arbiter = Arbiter::new(config, super::make_probe(args.fixed))?;

    let interrupted = Arc::new(Notify::new());
    let notify = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        eprintln!("\nStopping watch...");
        notify.notify_one();
    })?;

    tracing::info!(
        interval = %humantime::format_duration(arbiter.config().sample_interval),
        max = arbiter.config().max_resources,
        "watching rendering resources"
    );
    let monitor = arbiter.start_monitor();

    match args.run_for {
        Some(limit) => {
            tokio::select! {
                _ = interrupted.notified() => {}
                _ = tokio::time::sleep(limit) => {}
            }
        }
        None => interrupted.notified().await,
    }

    monitor.shutdown().await;
    output::print(&arbiter.snapshot(), args.format)?;
    Ok(ExitCode::SUCCESS)
}
