// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod config;
pub mod probe;
pub mod watch;

use anyhow::{Context, Result};
use rctx_adapters::{DriRenderNodeProbe, FixedProbe, TracedProbe};
use rctx_core::{ArbiterConfig, ResourceProbe};
use std::path::Path;

/// Load a config file, or fall back to defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<ArbiterConfig> {
    match path {
        Some(path) => ArbiterConfig::load(path)
            .with_context(|| format!("could not load config {}", path.display())),
        None => Ok(ArbiterConfig::default()),
    }
}

/// The DRM probe, or a fixed count for dry runs
pub fn make_probe(fixed: Option<usize>) -> Box<dyn ResourceProbe> {
    match fixed {
        Some(count) => Box::new(FixedProbe(count)),
        None => Box::new(TracedProbe::new(DriRenderNodeProbe::new())),
    }
}
