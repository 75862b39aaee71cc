use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
pub struct GeneralConfig {
    /// Logging level used when `RUST_LOG` is not set.
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Logging level for the application.
///
/// Controls the verbosity of log output, from critical errors only
/// to detailed trace information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors.
    Error,

    /// Warnings and errors, e.g. denied fullscreen or playback requests.
    Warn,

    /// Lifecycle messages: mounts, teardowns, synchronization summaries.
    #[default]
    Info,

    /// Per-handle synchronization decisions and state transitions.
    Debug,

    /// Everything, including skipped slots and element events.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
