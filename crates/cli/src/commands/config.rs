// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config command: validate and print arbiter configuration

use crate::output::{self, OutputFormat};
use anyhow::Result;
use rctx_core::ArbiterConfig;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(clap::Subcommand)]
pub enum ConfigCommand {
    /// Validate a config file and print the resolved values
    Check {
        /// Path to a TOML config file
        path: PathBuf,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Print the default configuration
    Default {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

/// Config rendered as TOML in text mode
#[derive(Serialize)]
#[serde(transparent)]
struct Resolved(ArbiterConfig);

impl std::fmt::Display for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = toml::to_string(&self.0).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", text.trim_end())
    }
}

pub fn handle(args: ConfigArgs) -> Result<ExitCode> {
    match args.command {
        ConfigCommand::Check { path, format } => {
            let config = super::load_config(Some(&path))?;
            tracing::info!(path = %path.display(), "config is valid");
            output::print(&Resolved(config), format)?;
        }
        ConfigCommand::Default { format } => {
            output::print(&Resolved(ArbiterConfig::default()), format)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
