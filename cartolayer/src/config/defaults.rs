//! Default values and constants for all configuration settings.

use super::file::config_directory;
use super::settings::*;
use crate::map::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::style::{
    StyleKey, DEFAULT_DARK_STYLE_URL, DEFAULT_LIGHT_STYLE_URL, DEFAULT_TERRAIN_STYLE_URL,
};
use crate::visibility::VisibilityState;

/// Default basemap.
pub const DEFAULT_STYLE: StyleKey = StyleKey::Terrain;

/// Default HTTP timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Default geometry endpoints, relative to the data base.
pub const DEFAULT_DEPARTMENTS_ENDPOINT: &str = "departements.geojson";
pub const DEFAULT_COMMUNES_ENDPOINT: &str = "communes.geojson";
pub const DEFAULT_SECTIONS_ENDPOINT: &str = "sections.geojson";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "cartolayer.log";

/// Highest zoom level accepted in `[map] zoom`.
pub const MAX_ZOOM: f64 = 24.0;

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = config_directory();

        Self {
            map: MapSettings {
                style: DEFAULT_STYLE,
                center_lon: DEFAULT_CENTER.lng,
                center_lat: DEFAULT_CENTER.lat,
                zoom: DEFAULT_ZOOM,
                navigation_control: true,
            },
            styles: StyleSettings {
                terrain: Some(DEFAULT_TERRAIN_STYLE_URL.to_string()),
                dark: Some(DEFAULT_DARK_STYLE_URL.to_string()),
                light: Some(DEFAULT_LIGHT_STYLE_URL.to_string()),
            },
            data: DataSettings {
                base: config_dir.join("data").to_string_lossy().into_owned(),
                departments: DEFAULT_DEPARTMENTS_ENDPOINT.to_string(),
                communes: DEFAULT_COMMUNES_ENDPOINT.to_string(),
                sections: DEFAULT_SECTIONS_ENDPOINT.to_string(),
            },
            visibility: VisibilityState::default(),
            download: DownloadSettings {
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            },
            logging: LoggingSettings {
                file: config_dir.join(DEFAULT_LOG_FILE),
            },
        }
    }
}
