//! Style key to style descriptor lookup.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by style lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The key is not part of the configured style set.
    #[error("Unknown style key '{0}'")]
    UnknownStyleKey(String),
}

/// Basemap selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleKey {
    /// Shaded relief basemap
    Terrain,
    /// Dark basemap
    Dark,
    /// Light basemap
    Light,
}

impl StyleKey {
    /// Every key, in display order.
    pub const ALL: [StyleKey; 3] = [StyleKey::Terrain, StyleKey::Dark, StyleKey::Light];

    /// Lowercase name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terrain => "terrain",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleKey {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == lowered)
            .ok_or_else(|| StyleError::UnknownStyleKey(s.to_string()))
    }
}

/// Reference to a basemap style document.
///
/// The engine treats the URL as opaque; nothing in this crate fetches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDescriptor {
    /// Key this descriptor was registered under
    pub key: StyleKey,
    /// Location of the style document
    pub url: String,
}

/// Default terrain style document.
pub const DEFAULT_TERRAIN_STYLE_URL: &str =
    "https://tiles.stadiamaps.com/styles/stamen_terrain.json";

/// Default dark style document.
pub const DEFAULT_DARK_STYLE_URL: &str =
    "https://basemaps.cartocdn.com/gl/dark-matter-gl-style/style.json";

/// Default light style document.
pub const DEFAULT_LIGHT_STYLE_URL: &str =
    "https://basemaps.cartocdn.com/gl/positron-gl-style/style.json";

/// Static mapping from [`StyleKey`] to [`StyleDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    styles: BTreeMap<StyleKey, StyleDescriptor>,
}

impl StyleRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
        }
    }

    /// Register (or replace) the descriptor for `key`.
    pub fn with_style(mut self, key: StyleKey, url: impl Into<String>) -> Self {
        self.styles.insert(
            key,
            StyleDescriptor {
                key,
                url: url.into(),
            },
        );
        self
    }

    /// Remove `key` from the registry.
    pub fn without_style(mut self, key: StyleKey) -> Self {
        self.styles.remove(&key);
        self
    }

    /// Resolve a key to its descriptor.
    pub fn resolve(&self, key: StyleKey) -> Result<&StyleDescriptor, StyleError> {
        self.styles
            .get(&key)
            .ok_or_else(|| StyleError::UnknownStyleKey(key.to_string()))
    }

    /// Configured keys in display order.
    pub fn keys(&self) -> impl Iterator<Item = StyleKey> + '_ {
        self.styles.keys().copied()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::empty()
            .with_style(StyleKey::Terrain, DEFAULT_TERRAIN_STYLE_URL)
            .with_style(StyleKey::Dark, DEFAULT_DARK_STYLE_URL)
            .with_style(StyleKey::Light, DEFAULT_LIGHT_STYLE_URL)
    }
}
