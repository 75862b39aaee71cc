use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{Command, CommandResult, formatting::format_header, types::CommandMetadata},
    config::Config,
    services::wall::format_progress,
};

use super::mount_wall;

/// Mounts the wall and prints each player's state, clock and volume.
pub struct StatusCommand {
    config: Arc<Config>,
}

impl StatusCommand {
    /// Creates a new StatusCommand.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Command for StatusCommand {
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let mut wall = mount_wall(&self.config).await?;

        let mut lines = vec![format_header(&format!(
            "{} players, {} attached",
            wall.len(),
            wall.slots().present_count()
        ))];

        for controller in wall.controllers() {
            let view = controller.view();
            lines.push(format!(
                "{}  {:<10} {}  volume {}  {}",
                controller.index(),
                view.state.get().to_string(),
                format_progress(view.current_time.get(), view.duration.get()),
                view.volume.get().level(),
                controller.descriptor(),
            ));
        }

        wall.teardown_all();
        Ok(lines.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "status".to_string(),
            description: "Mount the wall and show every player".to_string(),
            category: "wall".to_string(),
            args: vec![],
            examples: vec!["vidwall wall status".to_string()],
        }
    }
}
