//! vidwall command-line entry point.

use std::{
    error::Error,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use tracing::debug;
use vidwall::{
    cli::{CliService, formatting::format_error},
    config::{Config, ConfigPaths},
    tracing_config::{self, LogFormat},
};

/// Synchronized multi-stream video wall.
#[derive(Parser, Debug)]
#[command(name = "vidwall", version)]
struct Args {
    /// Configuration file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format; overrides VIDWALL_LOG_FORMAT
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Also write logs to a daily-rotated file in the data directory
    #[arg(long)]
    log_file: bool,

    /// Command category (e.g. config, wall, help)
    category: Option<String>,

    /// Command within the category
    command: Option<String>,

    /// Command arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    };

    let format = args.log_format.unwrap_or_else(LogFormat::from_env);
    if args.log_file {
        tracing_config::init_with_file(config.general.log_level, format)?;
    } else {
        tracing_config::init(config.general.log_level, format)?;
    }

    let config_path = args.config.clone().or_else(|| ConfigPaths::main_config().ok());
    debug!(path = ?config_path, streams = config.wall.streams.len(), "configuration loaded");

    run_cli_command(config, &args).await
}

/// Loads the configuration before logging exists; errors are printed by
/// the caller.
fn load_config(path: Option<&Path>) -> vidwall::Result<Config> {
    match path {
        Some(path) => Config::load_with_imports(path),
        None => Config::load(),
    }
}

/// Routes `category command args...` to the CLI service and prints the
/// result. Failures are printed in red and exit with status 1.
async fn run_cli_command(config: Config, args: &Args) -> Result<(), Box<dyn Error>> {
    let cli_service = CliService::new(config);

    let category = args.category.as_deref().unwrap_or("help");
    let command = args.command.as_deref().unwrap_or("");

    let result = cli_service
        .execute_command(category, command, &args.args)
        .await;

    match result {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
