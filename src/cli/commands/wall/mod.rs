//! Video wall commands, run against the simulated backend.
mod status;
mod streams;
mod sync;

use std::{sync::Arc, time::Duration};

pub use status::StatusCommand;
pub use streams::StreamsCommand;
pub use sync::SyncCommand;

use crate::{
    cli::{CliError, CommandRegistry},
    config::Config,
    services::wall::{VideoWall, backend::SimulatedElement},
};

const READY_GRACE: Duration = Duration::from_secs(2);

/// Registers the "wall" category.
pub fn register_commands(registry: &mut CommandRegistry, config: Arc<Config>) {
    const CATEGORY_NAME: &str = "wall";

    registry.register_command(
        CATEGORY_NAME,
        Box::new(StreamsCommand::new(Arc::clone(&config))),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(StatusCommand::new(Arc::clone(&config))),
    );
    registry.register_command(CATEGORY_NAME, Box::new(SyncCommand::new(config)));
}

/// Build the configured wall, mount it and wait for the players to load.
///
/// Players that never become ready are left loading; the caller reports
/// them as such.
async fn mount_wall(config: &Config) -> Result<VideoWall<SimulatedElement>, CliError> {
    let mut wall = VideoWall::simulated(config).map_err(|e| CliError::ServiceError {
        service: "Wall".to_string(),
        details: e.to_string(),
    })?;

    wall.mount_all();

    let timeout = Duration::from_millis(config.backend.simulated.ready_delay_ms) + READY_GRACE;
    wall.wait_until_ready(timeout).await;

    Ok(wall)
}
