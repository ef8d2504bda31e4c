// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Probe command: one-shot health check of live rendering resources
//!
//! Exit status is 0 within the limit and 2 when saturated, so the command
//! can back a container health check.

use crate::output::{self, OutputFormat};
use anyhow::{anyhow, Result};
use rctx_core::Arbiter;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status reported when the ambient count is over the limit
pub const SATURATED_EXIT: u8 = 2;

#[derive(clap::Args)]
pub struct ProbeArgs {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured max_resources
    #[arg(long)]
    max: Option<usize>,

    /// Report this count instead of probing /dev/dri (dry run)
    #[arg(long)]
    fixed: Option<usize>,

    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    observed: usize,
    max: usize,
    saturated: bool,
}

impl std::fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.saturated { "saturated" } else { "ok" };
        write!(f, "{}: {} of {} rendering resources", status, self.observed, self.max)
    }
}

pub fn handle(args: ProbeArgs) -> Result<ExitCode> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(max) = args.max {
        config = config.with_max_resources(max);
    }

    let arbiter = Arbiter::new(config, super::make_probe(args.fixed))?;
    let warning = arbiter.sample_now();
    let observed = arbiter
        .snapshot()
        .ambient_resource_count
        .ok_or_else(|| anyhow!("resource probe unavailable on this system"))?;

    let report = ProbeReport {
        observed,
        max: arbiter.config().max_resources,
        saturated: warning.is_some(),
    };
    output::print(&report, args.format)?;

    Ok(if report.saturated {
        ExitCode::from(SATURATED_EXIT)
    } else {
        ExitCode::SUCCESS
    })
}
