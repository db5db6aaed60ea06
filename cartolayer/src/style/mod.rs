//! Basemap styles.
//!
//! A [`StyleKey`] selects one basemap; the [`StyleRegistry`] maps each
//! configured key to the opaque [`StyleDescriptor`] handed to the rendering
//! engine when a surface is created.

mod registry;

pub use registry::{
    StyleDescriptor, StyleError, StyleKey, StyleRegistry, DEFAULT_DARK_STYLE_URL,
    DEFAULT_LIGHT_STYLE_URL, DEFAULT_TERRAIN_STYLE_URL,
};
