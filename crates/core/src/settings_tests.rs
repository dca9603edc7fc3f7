// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn empty_file_uses_defaults() {
    assert_eq!(Settings::parse("").unwrap(), Settings::default());
}

#[test]
fn defaults() {
    let settings = Settings::default();
    assert_eq!(settings.poll_interval, Duration::from_secs(4));
    assert_eq!(settings.check_timeout, Duration::from_secs(4));
    assert_eq!(settings.fetch_timeout, Duration::from_secs(10));
    assert!(!settings.live_only);
    assert_eq!(settings.scan_start_delay, Duration::from_millis(1200));
}

#[test]
fn humantime_fields_parse() {
    let settings = Settings::parse(
        r#"
poll_interval = "30s"
scan_start_delay = "500ms"
live_only = true
"#,
    )
    .unwrap();

    assert_eq!(settings.poll_interval, Duration::from_secs(30));
    assert_eq!(settings.scan_start_delay, Duration::from_millis(500));
    assert!(settings.live_only);
    assert_eq!(settings.fetch_timeout, Duration::from_secs(10));
}

#[test]
fn bad_duration_is_rejected() {
    assert!(Settings::parse(r#"poll_interval = "soon""#).is_err());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("claimwatch.toml")).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn invalid_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("claimwatch.toml");
    std::fs::write(&path, "live_only = \"maybe\"").unwrap();

    let err = Settings::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("claimwatch.toml"));
}
