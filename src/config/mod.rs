//! Configuration schema definitions and validation.
//!
//! Defines the complete configuration structure for vidwall: general
//! settings, the ordered stream list of the wall, the synchronization
//! tolerance and the parameters of the simulated backend. All sections are
//! serializable to/from TOML and have defaults, so an empty file is valid.

mod backend;
mod general;
mod loading;
mod path_ops;
mod paths;
mod sync;
mod wall;

#[cfg(test)]
mod tests;

pub use backend::{BackendConfig, SimulatedConfig};
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use sync::SyncConfig;
pub use wall::WallConfig;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use toml::Value;

use crate::{Result, VidwallError};

/// Main configuration structure for vidwall.
///
/// Represents the complete configuration schema that can be loaded
/// from TOML files. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Streams shown on the wall, in display order.
    #[serde(default)]
    pub wall: WallConfig,

    /// Synchronization policy for the "Sync All" control.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Playback backend parameters.
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Config {
    /// Checks values that deserialize fine but make no sense at runtime.
    ///
    /// # Errors
    /// Returns `VidwallError::InvalidConfigField` for a negative or non-finite
    /// tolerance, a blank stream address, or a simulated duration that is
    /// not a finite positive number.
    pub fn validate(&self) -> Result<()> {
        self.sync.validate()?;
        self.wall.validate()?;
        self.backend.simulated.validate()?;
        Ok(())
    }

    /// Looks up a value by dot-separated path (e.g. `sync.tolerance`).
    ///
    /// # Errors
    /// Returns `VidwallError::InvalidConfigField` if the path does not exist,
    /// or `VidwallError::ConfigValidation` if the config cannot be serialized.
    pub fn get_by_path(&self, path: &str) -> Result<Value> {
        let root = Value::try_from(self).map_err(|e| VidwallError::ConfigValidation {
            component: "config serialization".to_string(),
            details: e.to_string(),
        })?;

        path_ops::navigate_path(&root, path)
    }
}
