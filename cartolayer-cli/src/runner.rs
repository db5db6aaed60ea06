//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, configuration loading and map
//! construction to reduce duplication across command handlers.

use crate::error::CliError;
use cartolayer::catalog::LogicalLayer;
use cartolayer::config::ConfigFile;
use cartolayer::loader::SourceFetcher;
use cartolayer::logging::{init_logging_full, LoggingGuard};
use cartolayer::map::{MapController, MapOptions};
use cartolayer::style::StyleKey;
use cartolayer::surface::HeadlessEngine;
use tracing::info;

/// A composed map on the headless engine.
pub type HeadlessMap = MapController<HeadlessEngine, SourceFetcher>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// Log lines go to the configured log file; in debug mode they are also
    /// mirrored to stdout.
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| cartolayer::logging::default_log_file().to_string());

        let logging_guard = init_logging_full(&log_dir, &log_file, debug_mode, debug_mode)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Cartolayer v{}", cartolayer::VERSION);
        info!("Cartolayer CLI: {} command", command);
    }

    /// Fetcher for the configured data base.
    pub fn fetcher(&self) -> Result<SourceFetcher, CliError> {
        let data = &self.config.data;
        info!(base = %data.base, "Geometry source");
        Ok(SourceFetcher::from_base(&data.base, self.config.download.timeout)?)
    }

    /// Map options from the configuration with command-line overrides.
    pub fn map_options(
        &self,
        style: Option<StyleKey>,
        show: &[LogicalLayer],
        hide: &[LogicalLayer],
    ) -> Result<MapOptions, CliError> {
        if let Some(layer) = show.iter().find(|l| hide.contains(l)) {
            return Err(CliError::Config(format!(
                "layer '{}' cannot be both shown and hidden",
                layer
            )));
        }

        let mut options = self.config.map_options();
        if let Some(style) = style {
            options.style = style;
        }
        for layer in show {
            options.visibility.set(*layer, true);
        }
        for layer in hide {
            options.visibility.set(*layer, false);
        }
        Ok(options)
    }

    /// Build the map on a headless surface and wait for composition.
    pub async fn compose(&self, options: MapOptions) -> Result<HeadlessMap, CliError> {
        let mut map = MapController::new(HeadlessEngine::new(), self.fetcher()?, options);
        map.start()?;
        if map.run_until_composed().await.is_none() {
            return Err(CliError::NotComposed);
        }
        Ok(map)
    }
}
