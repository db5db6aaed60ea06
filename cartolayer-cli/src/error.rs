//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use cartolayer::config::{config_file_path, ConfigFileError};
use cartolayer::loader::FetchError;
use cartolayer::map::MapError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Configuration file could not be read or written
    ConfigFile(ConfigFileError),
    /// Geometry fetcher could not be created
    Fetcher(FetchError),
    /// The map could not be started
    Map(MapError),
    /// The map stopped before it was composed
    NotComposed,
    /// Some layers failed to load
    LayersFailed(usize),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in {}", config_file_path().display());
                eprintln!("or run 'cartolayer config init --force' to restore defaults.");
            }
            CliError::LayersFailed(_) => {
                eprintln!();
                eprintln!("Check the [data] section of your configuration:");
                eprintln!("  cartolayer config show");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Fetcher(e) => write!(f, "Failed to create geometry fetcher: {}", e),
            CliError::Map(e) => write!(f, "Map error: {}", e),
            CliError::NotComposed => write!(f, "The map stopped before composition finished"),
            CliError::LayersFailed(n) => write!(f, "{} layer(s) failed to load", n),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Fetcher(e) => Some(e),
            CliError::Map(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetcher(e)
    }
}

impl From<MapError> for CliError {
    fn from(e: MapError) -> Self {
        CliError::Map(e)
    }
}
