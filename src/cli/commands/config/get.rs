use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_toml_value,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
};

/// Command for reading a configuration value by dotted path.
///
/// ```bash
/// vidwall config get sync.tolerance
/// vidwall config get wall.streams.0
/// ```
pub struct GetCommand {
    config: Arc<Config>,
}

impl GetCommand {
    /// Creates a new GetCommand over the loaded configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for GetCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let path = args.first().ok_or_else(|| {
            CliError::InvalidArguments("Expected <path> argument for 'get' command".to_string())
        })?;

        let value = self
            .config
            .get_by_path(path)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        Ok(format!("{}: {}", path, format_toml_value(&value)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get".to_string(),
            description: "Get configuration value".to_string(),
            category: "config".to_string(),
            args: vec![CommandArg {
                name: "path".to_string(),
                description: "Configuration path (e.g., sync.tolerance)".to_string(),
                required: true,
                variadic: false,
                value_type: ArgType::Path,
            }],
            examples: vec![
                "vidwall config get sync.tolerance".to_string(),
                "vidwall config get wall.streams.0".to_string(),
            ],
        }
    }
}
