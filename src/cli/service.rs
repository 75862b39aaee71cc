use std::sync::Arc;

use crate::config::Config;

use super::{
    CliError, CommandRegistry,
    formatting::{format_category, format_command, format_description, format_header, format_usage},
};

/// High-level service for managing and executing CLI commands.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all built-in commands registered.
    ///
    /// The configuration is shared by every command.
    pub fn new(config: Config) -> Self {
        let mut registry = CommandRegistry::new(Arc::new(config));
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// `help` as the category, or a category with no command, prints the
    /// matching help text instead.
    ///
    /// # Errors
    /// Returns `CliError::CommandNotFound` if the command doesn't exist, or
    /// the error the command fails with.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        match (category, command_name) {
            ("help", "") => Ok(self.help(None)),
            ("help", category) | (category, "") => {
                if self.registry.get_categories().iter().any(|c| c == category) {
                    Ok(self.help(Some(category)))
                } else {
                    Err(CliError::CommandNotFound(format!(
                        "Failed to find category '{category}'"
                    )))
                }
            }
            _ => self.registry.execute(category, command_name, args).await,
        }
    }

    /// Lists all available commands organized by category.
    pub fn list_all(&self) -> Vec<(String, Vec<String>)> {
        self.registry.list_commands()
    }

    /// Help text for every category, or only `only`.
    pub fn help(&self, only: Option<&str>) -> String {
        let mut lines = vec![format_header("vidwall commands"), String::new()];

        for (category, commands) in self.list_all() {
            if only.is_some_and(|only| only != category) {
                continue;
            }

            lines.push(format_category(&category));
            for name in commands {
                let Some(metadata) = self.registry.metadata(&category, &name) else {
                    continue;
                };

                let usage: Vec<String> = metadata
                    .args
                    .iter()
                    .map(|arg| {
                        let dots = if arg.variadic { "..." } else { "" };
                        if arg.required {
                            format!("<{}{dots}>", arg.name)
                        } else {
                            format!("[{}{dots}]", arg.name)
                        }
                    })
                    .collect();

                lines.push(format!(
                    "  {} {}  {}",
                    format_command(&name),
                    usage.join(" "),
                    format_description(&metadata.description)
                ));
                for arg in &metadata.args {
                    lines.push(format!(
                        "      {} ({}) {}",
                        arg.name,
                        arg.value_type.hint(),
                        format_description(&arg.description)
                    ));
                }
                for example in &metadata.examples {
                    lines.push(format!("      {}", format_usage(example)));
                }
            }
            lines.push(String::new());
        }

        lines.join("\n").trim_end().to_string()
    }
}
