use std::{fs, path::Path};

use tracing::info;

use crate::{Result, VidwallError};

const DEFAULT_CONFIG: &str = "# vidwall configuration file\n\
#\n\
# [wall]\n\
# streams = [\"http://localhost/hls/stream1.m3u8\"]\n\
#\n\
# [sync]\n\
# tolerance = 0.3\n";

/// Creates a commented default configuration file.
pub(super) fn create_default_config_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| VidwallError::IoError {
            path: parent.to_path_buf(),
            details: format!("Failed to create config directory: {e}"),
        })?;
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| VidwallError::IoError {
        path: path.to_path_buf(),
        details: format!("Failed to create config file: {e}"),
    })?;

    info!("Created default config file at {}", path.display());
    Ok(())
}
