// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rctx - render context arbiter CLI

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, probe, watch};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rctx",
    version,
    about = "rctx - Inspect and watch exclusive rendering context usage"
)]
struct Cli {
    /// Log filter directive (overrides RUST_LOG)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    Config(config::ConfigArgs),
    /// Sample live rendering resources once (health check)
    Probe(probe::ProbeArgs),
    /// Sample periodically and warn on saturation
    Watch(watch::WatchArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.log.as_deref());

    match cli.command {
        Commands::Config(args) => config::handle(args),
        Commands::Probe(args) => probe::handle(args),
        Commands::Watch(args) => watch::handle(args).await,
    }
}

/// Logs go to stderr so stdout stays machine-readable
fn setup_logging(directive: Option<&str>) {
    let filter = match directive {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
