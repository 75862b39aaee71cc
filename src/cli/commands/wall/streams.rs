use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, types::CommandMetadata},
    config::Config,
    services::wall::{StreamDescriptor, StreamIndex},
};

/// Lists the configured streams with their slot index.
pub struct StreamsCommand {
    config: Arc<Config>,
}

impl StreamsCommand {
    /// Creates a new StreamsCommand.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for StreamsCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        if self.config.wall.streams.is_empty() {
            return Ok("No streams configured".to_string());
        }

        let lines: Vec<String> = self
            .config
            .wall
            .streams
            .iter()
            .enumerate()
            .map(|(i, url)| {
                let index = StreamIndex::new(i);
                let descriptor = StreamDescriptor::new(url.as_str());
                let kind = if descriptor.is_hls() { "hls" } else { "other" };
                let reference = if index.is_reference() { " (reference)" } else { "" };
                format!("{index}  {descriptor}  [{kind}]{reference}")
            })
            .collect();

        Ok(lines.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "streams".to_string(),
            description: "List configured streams".to_string(),
            category: "wall".to_string(),
            args: vec![],
            examples: vec!["vidwall wall streams".to_string()],
        }
    }
}
