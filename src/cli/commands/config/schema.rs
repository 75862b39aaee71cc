use async_trait::async_trait;

use crate::{
    cli::{CliError, Command, CommandResult, types::CommandMetadata},
    config::Config,
};

/// Prints the JSON schema of the configuration file.
pub struct SchemaCommand;

impl SchemaCommand {
    /// Creates a new SchemaCommand.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SchemaCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Command for SchemaCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let schema = schemars::schema_for!(Config);

        serde_json::to_string_pretty(&schema).map_err(|e| CliError::ServiceError {
            service: "Schema".to_string(),
            details: e.to_string(),
        })
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "schema".to_string(),
            description: "Print the configuration JSON schema".to_string(),
            category: "config".to_string(),
            args: vec![],
            examples: vec!["vidwall config schema > vidwall.schema.json".to_string()],
        }
    }
}
