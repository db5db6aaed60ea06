//! Cartolayer - administrative boundary map composition
//!
//! This library composes departments, communes and cadastral sections onto
//! a switchable basemap, keeps per-layer visibility toggles, and resolves
//! pointer hover to the most relevant feature under the cursor.
//!
//! # High-Level API
//!
//! The [`map`] module ties everything together behind one event loop:
//!
//! ```ignore
//! use cartolayer::config::ConfigFile;
//! use cartolayer::loader::SourceFetcher;
//! use cartolayer::map::MapController;
//! use cartolayer::surface::HeadlessEngine;
//!
//! let config = ConfigFile::load()?;
//! let fetcher = SourceFetcher::from_base(&config.data.base, config.download.timeout)?;
//! let mut map = MapController::new(HeadlessEngine::new(), fetcher, config.map_options());
//!
//! map.start()?;
//! map.run_until_composed().await;
//! map.handle().toggle(LogicalLayer::Communes);
//! ```

pub mod catalog;
pub mod compose;
pub mod config;
pub mod hover;
pub mod loader;
pub mod log;
pub mod logging;
pub mod map;
pub mod style;
pub mod surface;
pub mod visibility;

/// Version of the Cartolayer library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
