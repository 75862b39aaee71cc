use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Result, VidwallError};

/// Synchronization policy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Maximum drift in seconds a player may have from the reference before
    /// a sync pass seeks it.
    pub tolerance: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { tolerance: 0.3 }
    }
}

impl SyncConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(VidwallError::InvalidConfigField {
                field: "tolerance".to_string(),
                component: "sync".to_string(),
                reason: format!(
                    "must be a finite, non-negative number of seconds (got {})",
                    self.tolerance
                ),
            });
        }

        Ok(())
    }
}
