//! Integration tests for loading configuration files with imports.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use vidwall::{VidwallError, config::Config};

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

mod basic_loading {
    use super::*;

    #[test]
    fn loads_all_sections() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config.toml",
            r#"
            [general]
            log_level = "trace"

            [wall]
            streams = ["http://cam/a.m3u8", "http://cam/b.m3u8"]

            [sync]
            tolerance = 0.5

            [backend.simulated]
            duration = 30.0
            ready_delay_ms = 5
            native_hls = true
            "#,
        );

        let config = Config::load_with_imports(&path).unwrap();

        assert_eq!(config.wall.streams.len(), 2);
        assert_eq!(config.sync.tolerance, 0.5);
        assert_eq!(config.backend.simulated.duration, 30.0);
        assert!(config.backend.simulated.native_hls);
        assert!(config.backend.simulated.engine_supported);
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_with_imports(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.wall.streams.len(), 6);
        assert_eq!(config.sync.tolerance, 0.3);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.toml", "[sync\ntolerance = ");

        let err = Config::load_with_imports(&path).unwrap_err();

        assert!(matches!(err, VidwallError::TomlParseError { .. }));
    }

    #[test]
    fn validation_runs_after_merging() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.toml", "[sync]\ntolerance = -0.2\n");

        let err = Config::load_with_imports(&path).unwrap_err();

        assert!(matches!(err, VidwallError::InvalidConfigField { .. }));
    }
}

mod imports {
    use super::*;

    #[test]
    fn importing_file_takes_precedence() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "streams.toml",
            r#"
            [wall]
            streams = ["http://cam/one.m3u8", "http://cam/two.m3u8", "http://cam/three.m3u8"]

            [sync]
            tolerance = 1.0
            "#,
        );
        let path = write(
            &dir,
            "config.toml",
            r#"
            imports = ["@streams"]

            [sync]
            tolerance = 0.1
            "#,
        );

        let config = Config::load_with_imports(&path).unwrap();

        assert_eq!(config.wall.streams.len(), 3);
        assert_eq!(config.sync.tolerance, 0.1);
    }

    #[test]
    fn imports_resolve_relative_to_importer() {
        let dir = TempDir::new().unwrap();
        write(&dir, "parts/sync.toml", "[sync]\ntolerance = 0.7\n");
        write(&dir, "parts/base.toml", "imports = [\"@sync.toml\"]\n");
        let path = write(&dir, "config.toml", "imports = [\"@parts/base\"]\n");

        let config = Config::load_with_imports(&path).unwrap();

        assert_eq!(config.sync.tolerance, 0.7);
    }

    #[test]
    fn missing_import_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.toml", "imports = [\"@nowhere\"]\n");

        let err = Config::load_with_imports(&path).unwrap_err();

        assert!(matches!(err, VidwallError::ImportError { .. }));
    }

    #[test]
    fn circular_imports_are_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.toml", "imports = [\"@b\"]\n");
        write(&dir, "b.toml", "imports = [\"@a\"]\n");
        let path = dir.path().join("a.toml");

        let err = Config::load_with_imports(&path).unwrap_err();

        assert!(err.to_string().contains("Circular import detected"));
    }

    #[test]
    fn diamond_imports_are_not_circular() {
        let dir = TempDir::new().unwrap();
        write(&dir, "shared.toml", "[sync]\ntolerance = 0.4\n");
        write(&dir, "left.toml", "imports = [\"@shared\"]\n");
        write(&dir, "right.toml", "imports = [\"@shared\"]\n");
        let path = write(&dir, "config.toml", "imports = [\"@left\", \"@right\"]\n");

        let config = Config::load_with_imports(&path).unwrap();

        assert_eq!(config.sync.tolerance, 0.4);
    }
}
