//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use crate::catalog::{LayerCatalog, LogicalLayer};
use crate::map::MapOptions;
use crate::style::{StyleKey, StyleRegistry};
use crate::surface::LngLat;
use crate::visibility::VisibilityState;
use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Initial map view
    pub map: MapSettings,
    /// Basemap style documents
    pub styles: StyleSettings,
    /// Geometry locations
    pub data: DataSettings,
    /// Initial layer toggles
    pub visibility: VisibilityState,
    /// Download settings
    pub download: DownloadSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Initial map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Basemap shown on start
    pub style: StyleKey,
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: f64,
    /// Show zoom and rotation buttons
    pub navigation_control: bool,
}

/// Style document URL per basemap; `None` leaves the key unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSettings {
    pub terrain: Option<String>,
    pub dark: Option<String>,
    pub light: Option<String>,
}

impl StyleSettings {
    /// URL configured for `key`.
    pub fn url(&self, key: StyleKey) -> Option<&str> {
        match key {
            StyleKey::Terrain => self.terrain.as_deref(),
            StyleKey::Dark => self.dark.as_deref(),
            StyleKey::Light => self.light.as_deref(),
        }
    }

    pub(super) fn set_url(&mut self, key: StyleKey, url: Option<String>) {
        match key {
            StyleKey::Terrain => self.terrain = url,
            StyleKey::Dark => self.dark = url,
            StyleKey::Light => self.light = url,
        }
    }

    /// Registry holding every configured style.
    pub fn registry(&self) -> StyleRegistry {
        StyleKey::ALL
            .into_iter()
            .fold(StyleRegistry::empty(), |registry, key| match self.url(key) {
                Some(url) => registry.with_style(key, url),
                None => registry,
            })
    }
}

/// Geometry locations.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    /// Directory or `http(s)://` URL the endpoints are relative to
    pub base: String,
    pub departments: String,
    pub communes: String,
    pub sections: String,
}

impl DataSettings {
    /// Endpoint configured for `layer`.
    pub fn endpoint(&self, layer: LogicalLayer) -> &str {
        match layer {
            LogicalLayer::Departments => &self.departments,
            LogicalLayer::Communes => &self.communes,
            LogicalLayer::Sections => &self.sections,
        }
    }

    pub(super) fn set_endpoint(&mut self, layer: LogicalLayer, endpoint: String) {
        match layer {
            LogicalLayer::Departments => self.departments = endpoint,
            LogicalLayer::Communes => self.communes = endpoint,
            LogicalLayer::Sections => self.sections = endpoint,
        }
    }

    /// Default catalog with the configured endpoints.
    pub fn catalog(&self) -> LayerCatalog {
        LogicalLayer::ALL
            .into_iter()
            .fold(LayerCatalog::default(), |catalog, layer| {
                catalog.with_endpoint(layer, self.endpoint(layer))
            })
    }
}

/// Download configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// Timeout in seconds for HTTP requests.
    pub timeout: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}

impl ConfigFile {
    /// Controller options for this configuration.
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            style: self.map.style,
            center: LngLat::new(self.map.center_lon, self.map.center_lat),
            zoom: self.map.zoom,
            navigation_control: self.map.navigation_control,
            visibility: self.visibility,
            styles: self.styles.registry(),
            catalog: self.data.catalog(),
        }
    }
}
