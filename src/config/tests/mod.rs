//! Unit tests for config module
//!
//! Tests configuration types, defaults, validation and path lookup.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::unwrap_used)]

use crate::config::{Config, LogLevel, SyncConfig, WallConfig};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.wall.streams.len(), 6);
    assert_eq!(config.wall.streams[0], "http://localhost/hls/stream1.m3u8");
    assert_eq!(config.wall.streams[5], "http://localhost/hls/stream6.m3u8");
    assert!((config.sync.tolerance - 0.3).abs() < f64::EPSILON);
    assert!(config.validate().is_ok());
}

#[test]
fn config_serialize_toml() {
    let toml_str = toml::to_string(&Config::default()).unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[wall]"));
    assert!(toml_str.contains("[sync]"));
    assert!(toml_str.contains("[backend.simulated]"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [wall]
        streams = ["http://cam-a/index.m3u8", "http://cam-b/index.m3u8"]

        [sync]
        tolerance = 0.5

        [backend.simulated]
        duration = 120.0
        native_hls = true
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.wall.streams.len(), 2);
    assert!((config.sync.tolerance - 0.5).abs() < f64::EPSILON);
    assert!((config.backend.simulated.duration - 120.0).abs() < f64::EPSILON);
    assert!(config.backend.simulated.native_hls);
    assert!(config.backend.simulated.engine_supported);
}

#[test]
fn config_empty_toml_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.wall, WallConfig::default());
    assert_eq!(config.sync, SyncConfig::default());
}

#[test]
fn config_ignores_imports_and_unknown_fields() {
    let toml_str = r#"
        imports = ["@streams"]

        [sync]
        tolerance = 0.3
        unknown_field = "ignored"

        [unknown_section]
        some_field = 1
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn config_invalid_toml() {
    let invalid_toml = r#"
        [sync
        tolerance = 0.3
    "#;

    let result: Result<Config, toml::de::Error> = toml::from_str(invalid_toml);

    assert!(result.is_err());
}

#[test]
fn negative_tolerance_is_rejected() {
    let mut config = Config::default();
    config.sync.tolerance = -0.1;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("tolerance"));
}

#[test]
fn nan_tolerance_is_rejected() {
    let mut config = Config::default();
    config.sync.tolerance = f64::NAN;

    assert!(config.validate().is_err());
}

#[test]
fn zero_tolerance_is_allowed() {
    let mut config = Config::default();
    config.sync.tolerance = 0.0;

    assert!(config.validate().is_ok());
}

#[test]
fn non_positive_simulated_duration_is_rejected() {
    for duration in [-5.0, 0.0, f64::NAN, f64::INFINITY] {
        let mut config = Config::default();
        config.backend.simulated.duration = duration;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duration"), "accepted {duration}");
    }
}

#[test]
fn blank_stream_is_rejected() {
    let mut config = Config::default();
    config.wall.streams[2] = "  ".to_string();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("streams[2]"));
}

#[test]
fn get_by_path_reads_nested_values() {
    let config = Config::default();

    let tolerance = config.get_by_path("sync.tolerance").unwrap();
    assert_eq!(tolerance.as_float(), Some(0.3));

    let level = config.get_by_path("general.log_level").unwrap();
    assert_eq!(level.as_str(), Some("info"));

    let reference = config.get_by_path("wall.streams.0").unwrap();
    assert_eq!(reference.as_str(), Some("http://localhost/hls/stream1.m3u8"));
}

#[test]
fn get_by_path_reports_missing_segments() {
    let config = Config::default();

    assert!(config.get_by_path("sync.missing").is_err());
    assert!(config.get_by_path("wall.streams.42").is_err());
    assert!(config.get_by_path("wall.streams.first").is_err());
    assert!(config.get_by_path("sync.tolerance.inner").is_err());
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized: Config = toml::from_str(&toml_str).unwrap();

    assert_eq!(format!("{original:?}"), format!("{deserialized:?}"));
}
