// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Linux DRM probe: counts open file descriptors on `/dev/dri` nodes
//!
//! Every live GPU rendering context in this process keeps at least one
//! descriptor on a DRM device open, so the number of such descriptors is a
//! cheap stand-in for the number of live contexts.

use rctx_core::{ProbeError, ResourceProbe};
use std::path::{Path, PathBuf};

const PROC_SELF_FD: &str = "/proc/self/fd";
const DRI_DEVICE_DIR: &str = "/dev/dri";

#[derive(Debug, Clone)]
pub struct DriRenderNodeProbe {
    fd_dir: PathBuf,
    device_dir: PathBuf,
}

impl Default for DriRenderNodeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl DriRenderNodeProbe {
    pub fn new() -> Self {
        Self::with_paths(PROC_SELF_FD, DRI_DEVICE_DIR)
    }

    /// Probe a different descriptor table or device directory
    pub fn with_paths(fd_dir: impl Into<PathBuf>, device_dir: impl Into<PathBuf>) -> Self {
        Self {
            fd_dir: fd_dir.into(),
            device_dir: device_dir.into(),
        }
    }

    fn points_at_device(&self, link: &Path) -> bool {
        match std::fs::read_link(link) {
            Ok(target) => target.starts_with(&self.device_dir),
            // Descriptor closed between listing and reading
            Err(_) => false,
        }
    }
}

impl ResourceProbe for DriRenderNodeProbe {
    fn sample(&self) -> Result<usize, ProbeError> {
        let entries = std::fs::read_dir(&self.fd_dir).map_err(|e| {
            ProbeError::Unavailable(format!("{}: {}", self.fd_dir.display(), e))
        })?;

        let mut count = 0;
        for entry in entries {
            let entry = entry?;
            if self.points_at_device(&entry.path()) {
                count += 1;
            }
        }
        Ok(count)
    }
}
