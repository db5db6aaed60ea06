//! User configuration.
//!
//! The INI file at `~/.cartolayer/config.ini` holds the initial view, the
//! basemap style documents, where geometry is read from, the initial layer
//! toggles, and download/logging settings. A missing file means defaults.
//!
//! ```
//! use cartolayer::config::ConfigFile;
//! use cartolayer::catalog::LogicalLayer;
//!
//! let config = ConfigFile::default();
//! assert!(!config.visibility.get(LogicalLayer::Communes));
//! let options = config.map_options();
//! assert_eq!(options.style, config.map.style);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DataSettings, DownloadSettings, LoggingSettings, MapSettings, StyleSettings,
};
