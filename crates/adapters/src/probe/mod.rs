// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ambient resource probes

mod dri;

pub use dri::DriRenderNodeProbe;

use rctx_core::{ProbeError, ResourceProbe};

/// Probe that always reports the same count
///
/// Useful for dry runs of a configuration where no GPU is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe(pub usize);

impl ResourceProbe for FixedProbe {
    fn sample(&self) -> Result<usize, ProbeError> {
        Ok(self.0)
    }
}
