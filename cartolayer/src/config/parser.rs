//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::defaults::MAX_ZOOM;
use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::catalog::LogicalLayer;
use crate::style::StyleKey;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("style") {
            config.map.style = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "map".to_string(),
                key: "style".to_string(),
                value: v.to_string(),
                reason: "must be one of: terrain, dark, light".to_string(),
            })?;
        }
        if let Some(v) = section.get("center_lon") {
            config.map.center_lon = parse_ranged("map", "center_lon", v, -180.0, 180.0)?;
        }
        if let Some(v) = section.get("center_lat") {
            config.map.center_lat = parse_ranged("map", "center_lat", v, -90.0, 90.0)?;
        }
        if let Some(v) = section.get("zoom") {
            config.map.zoom = parse_ranged("map", "zoom", v, 0.0, MAX_ZOOM)?;
        }
        if let Some(v) = section.get("navigation_control") {
            config.map.navigation_control = parse_bool("map", "navigation_control", v)?;
        }
    }

    // [styles] section
    if let Some(section) = ini.section(Some("styles")) {
        for key in StyleKey::ALL {
            if let Some(v) = section.get(key.as_str()) {
                let v = v.trim();
                config
                    .styles
                    .set_url(key, (!v.is_empty()).then(|| v.to_string()));
            }
        }
    }

    if config.styles.url(config.map.style).is_none() {
        return Err(ConfigFileError::InvalidValue {
            section: "map".to_string(),
            key: "style".to_string(),
            value: config.map.style.to_string(),
            reason: "no URL configured for this style in [styles]".to_string(),
        });
    }

    // [data] section
    if let Some(section) = ini.section(Some("data")) {
        if let Some(v) = section.get("base") {
            let v = v.trim();
            if !v.is_empty() {
                config.data.base = if is_url(v) {
                    v.to_string()
                } else {
                    expand_tilde(v).to_string_lossy().into_owned()
                };
            }
        }
        for layer in LogicalLayer::ALL {
            if let Some(v) = section.get(layer.as_str()) {
                let v = v.trim();
                if v.is_empty() {
                    return Err(ConfigFileError::InvalidValue {
                        section: "data".to_string(),
                        key: layer.as_str().to_string(),
                        value: v.to_string(),
                        reason: "endpoint must not be empty".to_string(),
                    });
                }
                config.data.set_endpoint(layer, v.to_string());
            }
        }
    }

    // [visibility] section
    if let Some(section) = ini.section(Some("visibility")) {
        for (key, value) in section.iter() {
            let layer: LogicalLayer = key.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "visibility".to_string(),
                key: key.to_string(),
                value: value.to_string(),
                reason: "unknown layer (expected one of: departments, communes, sections)"
                    .to_string(),
            })?;
            config.visibility.set(layer, parse_bool("visibility", key, value)?);
        }
    }

    // [download] section
    if let Some(section) = ini.section(Some("download")) {
        if let Some(v) = section.get("timeout") {
            config.download.timeout = v
                .trim()
                .parse()
                .ok()
                .filter(|t| *t > 0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "download".to_string(),
                    key: "timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

fn parse_ranged(
    section: &str,
    key: &str,
    value: &str,
    min: f64,
    max: f64,
) -> Result<f64, ConfigFileError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: format!("must be a number between {} and {}", min, max),
        })
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(
    section: &str,
    key: &str,
    value: &str,
) -> Result<bool, ConfigFileError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be a boolean (true/false, yes/no, 1/0, on/off)".to_string(),
        }),
    }
}

pub(super) fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, content).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_invalid_style_key() {
        let err = load("[map]\nstyle = satellite\n").unwrap_err();
        assert!(err.to_string().contains("must be one of:"));
        assert!(err.to_string().contains("map.style"));
    }

    #[test]
    fn test_style_without_url_is_rejected() {
        let err = load("[map]\nstyle = dark\n\n[styles]\ndark =\n").unwrap_err();
        assert!(err.to_string().contains("no URL configured"));
    }

    #[test]
    fn test_empty_style_url_removes_key() {
        let config = load("[styles]\nlight =\n").unwrap();
        assert_eq!(config.styles.light, None);
        assert!(config.styles.registry().resolve(StyleKey::Light).is_err());
        assert!(config.styles.registry().resolve(StyleKey::Terrain).is_ok());
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let err = load("[map]\ncenter_lat = 91\n").unwrap_err();
        assert!(err.to_string().contains("center_lat"));

        let err = load("[map]\nzoom = abc\n").unwrap_err();
        assert!(err.to_string().contains("zoom"));
    }

    #[test]
    fn test_unknown_visibility_key_is_rejected() {
        let err = load("[visibility]\nroads = true\n").unwrap_err();
        match err {
            ConfigFileError::InvalidValue { section, key, .. } => {
                assert_eq!(section, "visibility");
                assert_eq!(key, "roads");
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_visibility_keys_keep_defaults() {
        let config = load("[visibility]\ncommunes = yes\nsections = off\n").unwrap();
        assert!(config.visibility.get(LogicalLayer::Departments));
        assert!(config.visibility.get(LogicalLayer::Communes));
        assert!(!config.visibility.get(LogicalLayer::Sections));
    }

    #[test]
    fn test_data_section() {
        let config = load(
            r#"
[data]
base = https://data.example.org/admin/
communes = communes-2024.geojson
"#,
        )
        .unwrap();

        assert_eq!(config.data.base, "https://data.example.org/admin/");
        assert_eq!(config.data.endpoint(LogicalLayer::Communes), "communes-2024.geojson");
        assert_eq!(
            config.data.endpoint(LogicalLayer::Sections),
            DEFAULT_SECTIONS_ENDPOINT
        );
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        assert!(load("[data]\nsections =\n").is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = load("[download]\ntimeout = 0\n").unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_partial_config() {
        let config = load(
            r#"
[map]
style = light
navigation_control = false

[download]
timeout = 45
"#,
        )
        .unwrap();

        assert_eq!(config.map.style, StyleKey::Light);
        assert!(!config.map.navigation_control);
        assert_eq!(config.download.timeout, 45);
        assert_eq!(config.map.zoom, ConfigFile::default().map.zoom);
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(path, home.join("test/path"));
        }

        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_parse_bool_values() {
        for v in ["true", "TRUE", "1", "yes", "on", " true "] {
            assert!(parse_bool("map", "k", v).unwrap(), "{} should be true", v);
        }
        for v in ["false", "0", "no", "OFF"] {
            assert!(!parse_bool("map", "k", v).unwrap(), "{} should be false", v);
        }
        for v in ["", "ture", "nope", "2"] {
            assert!(parse_bool("map", "k", v).is_err(), "{:?} should be rejected", v);
        }
    }

    #[test]
    fn test_misspelled_visibility_value_is_rejected() {
        let err = load("[visibility]
sections = ture
").unwrap_err();
        match err {
            ConfigFileError::InvalidValue {
                section,
                key,
                value,
                reason,
            } => {
                assert_eq!(section, "visibility");
                assert_eq!(key, "sections");
                assert_eq!(value, "ture");
                assert!(reason.contains("boolean"));
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_navigation_control_is_rejected() {
        let err = load("[map]
navigation_control = nope
").unwrap_err();
        assert!(err.to_string().contains("map.navigation_control"));
        assert!(err.to_string().contains("'nope'"));
    }
}
