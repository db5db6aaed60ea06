//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::parser::is_url;
use super::settings::ConfigFile;
use crate::catalog::LogicalLayer;
use crate::style::StyleKey;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let style_url = |key: StyleKey| config.styles.url(key).unwrap_or("").to_string();
    let base = if is_url(&config.data.base) {
        config.data.base.clone()
    } else {
        path_to_string(Path::new(&config.data.base))
    };
    let visible = |layer: LogicalLayer| config.visibility.get(layer);

    format!(
        r#"[map]
; Basemap shown on start: terrain, dark or light
style = {}
; Initial map centre in degrees
center_lon = {}
center_lat = {}
; Initial zoom level (0-24)
zoom = {}
; Show zoom and rotation buttons
navigation_control = {}

[styles]
; Style document URL for each basemap.
; Leave a value empty to make that basemap unavailable.
terrain = {}
dark = {}
light = {}

[data]
; Directory or http(s):// URL the geometry endpoints are relative to
base = {}
; Feature collection per layer (absolute URLs are used as-is)
departments = {}
communes = {}
sections = {}

[visibility]
; Layers shown when the map is composed
departments = {}
communes = {}
sections = {}

[download]
; Timeout in seconds for HTTP requests (default: 30)
timeout = {}

[logging]
; Log file path
file = {}
"#,
        config.map.style,
        config.map.center_lon,
        config.map.center_lat,
        config.map.zoom,
        config.map.navigation_control,
        style_url(StyleKey::Terrain),
        style_url(StyleKey::Dark),
        style_url(StyleKey::Light),
        base,
        config.data.departments,
        config.data.communes,
        config.data.sections,
        visible(LogicalLayer::Departments),
        visible(LogicalLayer::Communes),
        visible(LogicalLayer::Sections),
        config.download.timeout,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
