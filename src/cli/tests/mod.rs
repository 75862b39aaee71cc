//! Unit tests for the CLI module
//!
//! Registry, formatting and command execution against in-memory configs.

use std::sync::Arc;

use crate::cli::{CliError, CliService, CommandRegistry, formatting::format_toml_value};
use crate::config::Config;
use toml::Value;

fn service_with_streams(streams: &[&str]) -> CliService {
    let mut config = Config::default();
    config.wall.streams = streams.iter().map(|s| s.to_string()).collect();
    config.backend.simulated.ready_delay_ms = 10;
    CliService::new(config)
}

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn format_toml_value_scalars() {
    assert_eq!(format_toml_value(&Value::String("hello".to_string())), "\"hello\"");
    assert_eq!(format_toml_value(&Value::Integer(-123)), "-123");
    assert_eq!(format_toml_value(&Value::Float(0.3)), "0.3");
    assert_eq!(format_toml_value(&Value::Boolean(false)), "false");
}

#[test]
fn format_toml_value_collections_show_size() {
    let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
    assert_eq!(format_toml_value(&array), "[2]");

    let mut table = toml::map::Map::new();
    table.insert("tolerance".to_string(), Value::Float(0.3));
    assert_eq!(format_toml_value(&Value::Table(table)), "{1}");
}

#[test]
fn new_registry_is_empty() {
    let registry = CommandRegistry::new(Arc::new(Config::default()));
    assert!(registry.get_categories().is_empty());
}

#[test]
fn all_commands_are_registered() {
    let service = CliService::new(Config::default());

    assert_eq!(
        service.list_all(),
        vec![
            (
                "config".to_string(),
                vec!["get".to_string(), "schema".to_string()]
            ),
            (
                "wall".to_string(),
                vec![
                    "status".to_string(),
                    "streams".to_string(),
                    "sync".to_string()
                ]
            ),
        ]
    );
}

#[tokio::test]
async fn unknown_category_is_reported() {
    let service = CliService::new(Config::default());
    let result = service.execute_command("panel", "list", &[]).await;

    assert!(matches!(result, Err(CliError::CommandNotFound(_))));
}

#[tokio::test]
async fn help_lists_categories() {
    let service = CliService::new(Config::default());
    let help = service
        .execute_command("help", "", &[])
        .await
        .unwrap_or_default();

    assert!(help.contains("config"));
    assert!(help.contains("wall"));
    assert!(help.contains("positions"));
}

#[tokio::test]
async fn config_get_formats_value() {
    let service = CliService::new(Config::default());
    let output = service
        .execute_command("config", "get", &args(&["sync.tolerance"]))
        .await;

    assert_eq!(output.ok().as_deref(), Some("sync.tolerance: 0.3"));
}

#[tokio::test]
async fn config_get_requires_path() {
    let service = CliService::new(Config::default());
    let result = service.execute_command("config", "get", &[]).await;

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn config_get_rejects_extra_arguments() {
    let service = CliService::new(Config::default());
    let result = service
        .execute_command("config", "get", &args(&["sync", "wall"]))
        .await;

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn config_schema_is_json() {
    let service = CliService::new(Config::default());
    let output = service
        .execute_command("config", "schema", &[])
        .await
        .unwrap_or_default();

    let schema: serde_json::Value = serde_json::from_str(&output).unwrap_or_default();
    assert!(schema["properties"]["sync"].is_object());
    assert!(schema["properties"]["wall"].is_object());
}

#[tokio::test]
async fn wall_streams_marks_reference() {
    let service = service_with_streams(&["http://a/one.m3u8", "http://a/two.mp4"]);
    let output = service
        .execute_command("wall", "streams", &[])
        .await
        .unwrap_or_default();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("#0"));
    assert!(lines[0].contains("[hls] (reference)"));
    assert!(lines[1].contains("[other]"));
}

#[tokio::test(start_paused = true)]
async fn wall_status_reports_every_player() {
    let service = service_with_streams(&["http://a/one.m3u8", "http://a/two.m3u8"]);
    let output = service
        .execute_command("wall", "status", &[])
        .await
        .unwrap_or_default();

    assert!(output.contains("2 players, 2 attached"));
    assert_eq!(output.matches("ready").count(), 2);
    assert!(output.contains("0:00 / 10:00"));
    assert!(output.contains("volume high"));
}

#[tokio::test(start_paused = true)]
async fn wall_sync_aligns_to_reference() {
    let service = service_with_streams(&[
        "http://a/one.m3u8",
        "http://a/two.m3u8",
        "http://a/three.m3u8",
    ]);
    let output = service
        .execute_command("wall", "sync", &args(&["10", "10.5", "8"]))
        .await
        .unwrap_or_default();

    assert!(output.contains("#0  reference at 10.000s"));
    assert!(output.contains("#1  seeked 10.500s -> 10.000s"));
    assert!(output.contains("#2  seeked 8.000s -> 10.000s"));
    assert!(output.contains("2 adjusted, 0 absent"));
}

#[tokio::test(start_paused = true)]
async fn wall_sync_within_tolerance_leaves_players_alone() {
    let service = service_with_streams(&["http://a/one.m3u8", "http://a/two.m3u8"]);
    let output = service
        .execute_command("wall", "sync", &args(&["5", "5.2"]))
        .await
        .unwrap_or_default();

    assert!(output.contains("#1  in sync at 5.200s"));
    assert!(output.contains("0 adjusted"));
}

#[tokio::test]
async fn wall_sync_rejects_bad_positions() {
    let service = service_with_streams(&["http://a/one.m3u8"]);

    let result = service
        .execute_command("wall", "sync", &args(&["ten"]))
        .await;
    assert!(matches!(result, Err(CliError::InvalidArgument { .. })));

    let result = service
        .execute_command("wall", "sync", &args(&["1", "2"]))
        .await;
    assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
}
