use std::{
    env, fs,
    io::{Error, ErrorKind},
    path::PathBuf,
};

const APP_DIR: &str = "vidwall";

/// Utility struct for locating configuration and log directories.
///
/// Follows the XDG Base Directory specification.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory path for the application.
    ///
    /// Checks `XDG_CONFIG_HOME` first, then falls back to `$HOME/.config`,
    /// and appends `vidwall`.
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set.
    pub fn config_dir() -> Result<PathBuf, Error> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| {
                Error::new(
                    ErrorKind::NotFound,
                    "Neither XDG_CONFIG_HOME nor HOME environment variable found",
                )
            })?;

        Ok(PathBuf::from(config_home).join(APP_DIR))
    }

    /// Returns the application data directory, creating it if needed.
    ///
    /// Uses `XDG_DATA_HOME` when set, otherwise `$HOME/.local/share`.
    ///
    /// # Errors
    /// Returns an error if no base directory can be determined or the
    /// directory cannot be created.
    pub fn data_dir() -> Result<PathBuf, Error> {
        let data_home = env::var("XDG_DATA_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.local/share")))
            .map_err(|_| {
                Error::new(
                    ErrorKind::NotFound,
                    "Neither XDG_DATA_HOME nor HOME environment variable found",
                )
            })?;

        let app_dir = PathBuf::from(data_home).join(APP_DIR);
        fs::create_dir_all(&app_dir)?;

        Ok(app_dir)
    }

    /// Returns the log directory, creating it if needed.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn log_dir() -> Result<PathBuf, Error> {
        let log_dir = Self::data_dir()?.join("logs");
        fs::create_dir_all(&log_dir)?;

        Ok(log_dir)
    }

    /// Returns the path to the main configuration file.
    ///
    /// # Errors
    /// Returns an error if the configuration directory cannot be determined.
    pub fn main_config() -> Result<PathBuf, Error> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
