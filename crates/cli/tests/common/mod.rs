// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch directory holding config files for one test
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write a file relative to the project root and return its path
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn rctx(&self) -> Command {
        let mut cmd = rctx();
        cmd.current_dir(self.dir.path());
        cmd
    }
}

pub fn rctx() -> Command {
    let mut cmd = Command::cargo_bin("rctx").expect("rctx binary should be built");
    cmd.env_remove("RUST_LOG");
    cmd
}
