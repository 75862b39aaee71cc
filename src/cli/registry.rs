use std::{collections::HashMap, sync::Arc};

use crate::config::Config;

use super::{
    CliError, Command,
    commands::{config, wall},
    types::CommandMetadata,
};

/// Registry for CLI commands organized by category.
///
/// ```text
/// registry
/// ├── config
/// │   ├── get
/// │   └── schema
/// └── wall
///     ├── status
///     ├── streams
///     └── sync
/// ```
pub struct CommandRegistry {
    /// category name -> (command name -> command implementation)
    categories: HashMap<String, HashMap<String, Box<dyn Command>>>,
    config: Arc<Config>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            categories: HashMap::new(),
            config,
        }
    }

    /// Registers a command in the specified category.
    ///
    /// The command's metadata name is its key; an existing command with the
    /// same name is replaced.
    pub fn register_command(&mut self, category: &str, command: Box<dyn Command>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(command.metadata().name, command);
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` if the category or command does
    /// not exist, `CliError::InvalidArguments` if the argument count does
    /// not match, and whatever the command itself returns.
    pub async fn execute(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CliError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let found_command = found_category.get(command_name).ok_or_else(|| {
            CliError::CommandNotFound(format!(
                "Failed to find command '{command_name}' in '{category}'"
            ))
        })?;

        Self::validate_args(&found_command.metadata(), args)?;

        found_command.execute(args).await
    }

    /// Lists all registered commands organized by category, sorted.
    pub fn list_commands(&self) -> Vec<(String, Vec<String>)> {
        let mut categories: Vec<(String, Vec<String>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut command_list: Vec<String> = commands.keys().cloned().collect();
                command_list.sort();

                (category.clone(), command_list)
            })
            .collect();

        categories.sort();

        categories
    }

    /// Metadata of one command, if registered.
    pub fn metadata(&self, category: &str, command_name: &str) -> Option<CommandMetadata> {
        self.categories
            .get(category)?
            .get(command_name)
            .map(|command| command.metadata())
    }

    /// Names of all registered categories, sorted.
    pub fn get_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.categories.keys().cloned().collect();
        categories.sort();
        categories
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();
        let variadic = metadata.args.iter().any(|arg| arg.variadic);

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at least {} arguments, got {}",
                required_count,
                args.len(),
            )));
        }

        if !variadic && args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "Expected at most {} arguments, got {}",
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers all available CLI commands in their respective categories.
    pub fn register_all_commands(&mut self) {
        config::register_commands(self, Arc::clone(&self.config));
        wall::register_commands(self, Arc::clone(&self.config));
    }
}
