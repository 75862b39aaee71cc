//! Command-line interface.
//!
//! Commands are organized by category in a registry and generate their
//! help text from metadata.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use commands::{config::GetCommand, wall::SyncCommand};
pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{ArgType, CliError, Command, CommandArg, CommandMetadata, CommandResult};
