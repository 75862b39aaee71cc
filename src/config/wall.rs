use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Result, VidwallError};

const DEFAULT_STREAM_COUNT: usize = 6;

/// Layout of the video wall.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct WallConfig {
    /// Stream addresses, one player per entry. The first entry is the
    /// synchronization reference.
    pub streams: Vec<String>,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            streams: (1..=DEFAULT_STREAM_COUNT)
                .map(|n| format!("http://localhost/hls/stream{n}.m3u8"))
                .collect(),
        }
    }
}

impl WallConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if let Some(index) = self.streams.iter().position(|s| s.trim().is_empty()) {
            return Err(VidwallError::InvalidConfigField {
                field: format!("streams[{index}]"),
                component: "wall".to_string(),
                reason: "stream address must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
