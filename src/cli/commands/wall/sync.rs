use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_header,
        types::{ArgType, CommandArg, CommandMetadata},
    },
    config::Config,
    services::wall::format_time,
};

use super::mount_wall;

/// Seeks the players to the given positions, then runs one sync pass.
///
/// ```bash
/// vidwall wall sync 10 10.5 8
/// ```
pub struct SyncCommand {
    config: Arc<Config>,
}

impl SyncCommand {
    /// Creates a new SyncCommand.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    fn parse_positions(args: &[String]) -> Result<Vec<f64>, CliError> {
        args.iter()
            .map(|arg| match arg.parse::<f64>() {
                Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Ok(seconds),
                _ => Err(CliError::InvalidArgument {
                    arg: "positions".to_string(),
                    reason: format!("'{arg}' is not a non-negative number of seconds"),
                }),
            })
            .collect()
    }
}

#[async_trait]
impl Command for SyncCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let positions = Self::parse_positions(args)?;
        let players = self.config.wall.streams.len();

        if positions.len() > players {
            return Err(CliError::InvalidArgument {
                arg: "positions".to_string(),
                reason: format!(
                    "{} positions given for {} players",
                    positions.len(),
                    players
                ),
            });
        }

        let mut wall = mount_wall(&self.config).await?;

        for (controller, seconds) in wall.controllers().iter().zip(&positions) {
            controller.seek(*seconds);
        }

        let report = wall.sync_all();

        let header = match report.reference {
            Some(t0) => format!("reference {} ({t0:.3}s)", format_time(t0)),
            None => "reference absent, nothing synchronized".to_string(),
        };
        let mut lines = vec![format_header(&header)];
        lines.extend(
            report
                .outcomes
                .iter()
                .map(|(index, outcome)| format!("{index}  {outcome}")),
        );
        lines.push(format!(
            "{} adjusted, {} absent, tolerance {:.3}s",
            report.adjusted(),
            report.absent(),
            wall.coordinator().tolerance().as_secs()
        ));

        wall.teardown_all();
        Ok(lines.join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "sync".to_string(),
            description: "Seek players to positions and synchronize once".to_string(),
            category: "wall".to_string(),
            args: vec![CommandArg {
                name: "positions".to_string(),
                description: "Start position in seconds for each player, in slot order"
                    .to_string(),
                required: false,
                variadic: true,
                value_type: ArgType::Number,
            }],
            examples: vec![
                "vidwall wall sync".to_string(),
                "vidwall wall sync 10 10.5 8".to_string(),
            ],
        }
    }
}
