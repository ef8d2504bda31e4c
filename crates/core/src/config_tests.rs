// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;
use yare::parameterized;

#[test]
fn defaults_match_documented_values() {
    let config = ArbiterConfig::default();
    assert!(config.auto_cleanup);
    assert_eq!(config.max_resources, 1);
    assert!(config.preserve_active_resource);
    assert_eq!(config.sample_interval, Duration::from_secs(30));
}

#[test]
fn builder_overrides_fields() {
    let config = ArbiterConfig::new()
        .with_auto_cleanup(false)
        .with_max_resources(4)
        .with_preserve_active_resource(false)
        .with_sample_interval(Duration::from_secs(5));

    assert!(!config.auto_cleanup);
    assert_eq!(config.max_resources, 4);
    assert!(!config.preserve_active_resource);
    assert_eq!(config.sample_interval, Duration::from_secs(5));
}

#[test]
fn empty_document_yields_defaults() {
    assert_eq!(
        ArbiterConfig::from_toml_str("").unwrap(),
        ArbiterConfig::default()
    );
}

#[test]
fn partial_document_keeps_other_defaults() {
    let config = ArbiterConfig::from_toml_str(
        r#"
        max_resources = 3
        sample_interval = "1m 30s"
        "#,
    )
    .unwrap();

    assert_eq!(config.max_resources, 3);
    assert_eq!(config.sample_interval, Duration::from_secs(90));
    assert!(config.auto_cleanup);
}

#[parameterized(
    zero_max = { "max_resources = 0", "max_resources" },
    zero_interval = { "sample_interval = \"0s\"", "sample_interval" },
)]
fn invalid_values_are_rejected(doc: &str, field: &str) {
    let err = ArbiterConfig::from_toml_str(doc).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains(field)));
}

#[parameterized(
    unknown_key = { "max_contexts = 2" },
    wrong_type = { "auto_cleanup = \"yes\"" },
    bad_duration = { "sample_interval = \"soon\"" },
)]
fn malformed_documents_fail_to_parse(doc: &str) {
    let err = ArbiterConfig::from_toml_str(doc).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "auto_cleanup = false").unwrap();

    let config = ArbiterConfig::load(file.path()).unwrap();

    assert!(!config.auto_cleanup);
}

#[test]
fn load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = ArbiterConfig::load(&path).unwrap_err();

    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn serializes_interval_in_human_form() {
    let toml = toml::to_string(&ArbiterConfig::default()).unwrap();
    assert!(toml.contains("sample_interval = \"30s\""));
}
