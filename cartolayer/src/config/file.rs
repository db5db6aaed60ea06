//! Configuration file handling for ~/.cartolayer/config.ini.
//!
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use super::settings::ConfigFile;
use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.cartolayer/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }
}

/// Get the path to the config directory (~/.cartolayer).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cartolayer")
}

/// Get the path to the config file (~/.cartolayer/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LogicalLayer;
    use crate::config::defaults::*;
    use crate::style::StyleKey;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.map.style, StyleKey::Terrain);
        assert_eq!(config.download.timeout, DEFAULT_DOWNLOAD_TIMEOUT_SECS);
        assert_eq!(config.data.endpoint(LogicalLayer::Communes), "communes.geojson");
        assert!(config.visibility.get(LogicalLayer::Sections));
        assert!(!config.visibility.get(LogicalLayer::Communes));
        assert!(config.styles.url(StyleKey::Dark).is_some());
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_then_load_preserves_settings() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.map.style = StyleKey::Dark;
        config.map.zoom = 8.5;
        config.styles.light = None;
        config.data.base = "https://data.example.org/admin".to_string();
        config.visibility.set(LogicalLayer::Communes, true);
        config.download.timeout = 12;
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded.map.style, StyleKey::Dark);
        assert_eq!(loaded.map.zoom, 8.5);
        assert_eq!(loaded.styles.light, None);
        assert_eq!(loaded.data.base, "https://data.example.org/admin");
        assert!(loaded.visibility.get(LogicalLayer::Communes));
        assert_eq!(loaded.download.timeout, 12);
    }

    #[test]
    fn test_map_options_follow_config() {
        let mut config = ConfigFile::default();
        config.styles.light = None;
        config.data.sections = "cadastre/sections.json".to_string();

        let options = config.map_options();

        assert!(options.styles.resolve(StyleKey::Light).is_err());
        assert_eq!(
            options.catalog.entry(LogicalLayer::Sections).endpoint,
            "cadastre/sections.json"
        );
        assert_eq!(options.center.lng, config.map.center_lon);
    }
}
