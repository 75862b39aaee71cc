use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
///
/// Each variant carries enough context to tell the user what went wrong
/// without consulting the logs.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// The argument count does not match the command's metadata.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A single argument could not be parsed or is out of range.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        arg: String,
        /// Why it was rejected
        reason: String,
    },

    /// Loading or querying the configuration failed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The wall or another service failed.
    #[error("{service} error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// What happened
        details: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for command execution results.
///
/// Commands return their output as a string; `main` prints it.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "path", "positions").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// Whether this argument absorbs all remaining values.
    pub variadic: bool,

    /// The expected type of this argument, shown in help text.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A numeric value (integer or float).
    Number,

    /// A configuration path.
    Path,
}

impl ArgType {
    /// Placeholder shown in usage lines.
    pub fn hint(self) -> &'static str {
        match self {
            ArgType::Number => "number",
            ArgType::Path => "path",
        }
    }
}

/// Complete metadata for a CLI command.
///
/// Used for help generation, argument count validation and discovery.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "get", "sync").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "config", "wall").
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against
    /// [`Command::metadata`]; the command validates the values.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values, configuration
    /// errors or service failures.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
