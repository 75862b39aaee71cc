mod circular_detection;
mod file_creation;
mod merging;

use std::{
    fs,
    path::{Path, PathBuf},
};

use circular_detection::ImportChain;
use file_creation::create_default_config_file;
use merging::merge_toml_configs;
use toml::Value;
use tracing::{debug, instrument};

use super::{Config, ConfigPaths};
use crate::{Result, VidwallError};

const IMPORTS_KEY: &str = "imports";
const IMPORT_PREFIX: char = '@';

impl Config {
    /// Loads the main configuration file from the XDG config directory.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined or
    /// [`Config::load_with_imports`] fails.
    pub fn load() -> Result<Config> {
        let path = ConfigPaths::main_config()?;
        Self::load_with_imports(&path)
    }

    /// Loads a configuration file, resolving `imports = ["@file"]` entries.
    ///
    /// Imported files are merged first, in listed order; the importing file
    /// wins on conflicts. A missing file is created with a header comment
    /// and yields the defaults. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A file cannot be read or created
    /// - Any TOML is invalid
    /// - An import cannot be resolved, or imports form a cycle
    /// - The merged configuration fails validation
    #[instrument]
    pub fn load_with_imports(path: &Path) -> Result<Config> {
        if !path.exists() {
            create_default_config_file(path)?;
        }

        let canonical_path = path.canonicalize().map_err(|e| VidwallError::IoError {
            path: path.to_path_buf(),
            details: format!("Failed to resolve path: {e}"),
        })?;

        let mut chain = ImportChain::default();
        let merged = Self::load_value(&canonical_path, &mut chain)?;

        let config: Config = merged
            .try_into()
            .map_err(|e| VidwallError::ConfigValidation {
                component: "config parsing".to_string(),
                details: e.to_string(),
            })?;

        config.validate()?;
        debug!(streams = config.wall.streams.len(), "configuration loaded");

        Ok(config)
    }

    fn load_value(path: &Path, chain: &mut ImportChain) -> Result<Value> {
        chain.enter(path)?;

        let result = Self::read_and_merge(path, chain);
        chain.leave();
        result
    }

    fn read_and_merge(path: &Path, chain: &mut ImportChain) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|e| VidwallError::import(e, path))?;
        let value: Value =
            toml::from_str(&content).map_err(|e| VidwallError::toml_parse(e, Some(path)))?;

        let imported = Self::import_paths(&value)
            .iter()
            .map(|import| {
                let resolved = Self::resolve_import_path(path, import)?;
                let canonical = resolved
                    .canonicalize()
                    .map_err(|e| VidwallError::import(e, &resolved))?;

                Self::load_value(&canonical, chain)
            })
            .collect::<Result<Vec<Value>>>()?;

        Ok(merge_toml_configs(imported, value))
    }

    fn import_paths(value: &Value) -> Vec<String> {
        let Some(Value::Array(imports)) = value.get(IMPORTS_KEY) else {
            return Vec::new();
        };

        imports
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|s| s.strip_prefix(IMPORT_PREFIX))
            .map(str::to_owned)
            .collect()
    }

    fn resolve_import_path(base_path: &Path, import_path: &str) -> Result<PathBuf> {
        let parent_dir = base_path
            .parent()
            .ok_or_else(|| VidwallError::ImportError {
                path: base_path.to_path_buf(),
                details: "Invalid base path - no parent directory".to_string(),
            })?;

        let mut import_path_buf = PathBuf::from(import_path);
        if import_path_buf.extension().is_none() {
            import_path_buf.set_extension("toml");
        }

        Ok(parent_dir.join(import_path_buf))
    }
}
