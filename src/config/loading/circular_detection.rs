use std::path::{Path, PathBuf};

use crate::{Result, VidwallError};

/// The chain of files currently being imported, outermost first.
#[derive(Default)]
pub(super) struct ImportChain {
    files: Vec<PathBuf>,
}

impl ImportChain {
    /// Pushes `path` onto the chain, failing if it is already on it.
    pub(super) fn enter(&mut self, path: &Path) -> Result<()> {
        if self.files.iter().any(|p| p == path) {
            let mut names: Vec<String> = self.files.iter().map(|p| display_name(p)).collect();
            names.push(display_name(path));

            return Err(VidwallError::ConfigValidation {
                component: "import system".to_string(),
                details: format!("Circular import detected: {}", names.join(" -> ")),
            });
        }

        self.files.push(path.to_path_buf());
        Ok(())
    }

    /// Pops the innermost file once it has been fully processed.
    pub(super) fn leave(&mut self) {
        self.files.pop();
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}
