// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box tests for the rctx binary
//!
//! These invoke the CLI and verify stdout, stderr and exit codes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use common::{rctx, Project};
use predicates::prelude::*;

// =============================================================================
// Help
// =============================================================================

#[test]
fn help_lists_commands() {
    rctx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("probe"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn unknown_command_fails() {
    rctx().arg("frobnicate").assert().failure();
}

// =============================================================================
// config
// =============================================================================

#[test]
fn config_default_prints_toml() {
    rctx()
        .args(["config", "default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_resources = 1"))
        .stdout(predicate::str::contains("sample_interval = \"30s\""));
}

#[test]
fn config_check_prints_resolved_values_as_json() {
    let project = Project::empty();
    let path = project.file("rctx.toml", "max_resources = 3\nsample_interval = \"5s\"\n");

    let output = project
        .rctx()
        .args(["config", "check", "--format", "json"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["max_resources"], 3);
    assert_eq!(json["sample_interval"], "5s");
    assert_eq!(json["auto_cleanup"], true);
}

#[test]
fn config_check_rejects_invalid_values() {
    let project = Project::empty();
    let path = project.file("rctx.toml", "max_resources = 0\n");

    project
        .rctx()
        .args(["config", "check"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_resources must be at least 1"));
}

#[test]
fn config_check_rejects_unknown_keys() {
    let project = Project::empty();
    let path = project.file("rctx.toml", "max_contexts = 2\n");

    project
        .rctx()
        .args(["config", "check"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load config"));
}

#[test]
fn config_check_missing_file_fails() {
    let project = Project::empty();

    project
        .rctx()
        .args(["config", "check", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

// =============================================================================
// probe
// =============================================================================

#[test]
fn probe_within_limit_succeeds() {
    rctx()
        .args(["probe", "--fixed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 1 of 1 rendering resources"));
}

#[test]
fn probe_over_limit_exits_with_saturated_status() {
    rctx()
        .args(["probe", "--fixed", "3", "--max", "2"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("saturated: 3 of 2"))
        .stderr(predicate::str::contains("exceed the limit of 2"));
}

#[test]
fn probe_uses_max_from_config() {
    let project = Project::empty();
    let path = project.file("rctx.toml", "max_resources = 4\n");

    let output = project
        .rctx()
        .args(["probe", "--fixed", "3", "--format", "json", "--config"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["observed"], 3);
    assert_eq!(json["max"], 4);
    assert_eq!(json["saturated"], false);
}

// =============================================================================
// watch
// =============================================================================

#[test]
fn watch_for_duration_samples_and_prints_snapshot() {
    rctx()
        .args([
            "watch", "--fixed", "3", "--max", "1", "--interval", "50ms", "--for", "300ms",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ambient:   3"))
        .stdout(predicate::str::contains("owner:     (none)"))
        .stderr(predicate::str::contains("exceed the limit of 1"));
}

#[test]
fn watch_rejects_bad_interval() {
    rctx()
        .args(["watch", "--interval", "soon"])
        .assert()
        .failure();
}
