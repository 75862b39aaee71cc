use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Result, VidwallError};

/// Playback backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Built-in simulated element and decoding engine.
    pub simulated: SimulatedConfig,
}

/// Parameters of the simulated backend.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct SimulatedConfig {
    /// Length of every simulated stream, in seconds.
    pub duration: f64,

    /// Delay between loading a source and the manifest being parsed.
    pub ready_delay_ms: u64,

    /// Whether the adaptive-streaming engine reports itself as supported.
    pub engine_supported: bool,

    /// Whether elements can play HLS without the engine.
    pub native_hls: bool,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            duration: 600.0,
            ready_delay_ms: 250,
            engine_supported: true,
            native_hls: false,
        }
    }
}

impl SimulatedConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(VidwallError::InvalidConfigField {
                field: "duration".to_string(),
                component: "backend.simulated".to_string(),
                reason: format!(
                    "must be a finite, positive number of seconds (got {})",
                    self.duration
                ),
            });
        }

        Ok(())
    }
}
