//! Value types exchanged with the rendering engine.

use crate::catalog::{GeometryKind, Paint};
use crate::style::StyleDescriptor;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Errors reported by the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The engine could not create a surface
    #[error("Failed to create surface: {0}")]
    CreateFailed(String),

    /// A data source was refused
    #[error("Source '{id}' rejected: {reason}")]
    SourceRejected { id: String, reason: String },

    /// A styled layer was refused
    #[error("Layer '{id}' rejected: {reason}")]
    LayerRejected { id: String, reason: String },

    /// The layer id is not registered on the surface
    #[error("Unknown surface layer '{0}'")]
    UnknownLayer(String),
}

/// Generation number of a surface; never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// Handle of a registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Handle of a popup overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupId(pub u64);

/// Pixel position on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lng, self.lat)
    }
}

/// Layout visibility of a surface layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// Layout property value understood by the engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "none",
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible)
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Self::Visible
        } else {
            Self::Hidden
        }
    }
}

/// Pointer cursor affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    /// Something inspectable is under the pointer
    Pointer,
}

/// Built-in surface controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Zoom and rotation buttons
    Navigation,
}

/// Engine events a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerMove,
    PointerLeave,
}

/// Parameters for creating a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Basemap style
    pub style: StyleDescriptor,
    /// Initial map centre
    pub center: LngLat,
    /// Initial zoom level
    pub zoom: f64,
    /// Controls added right after creation
    pub controls: Vec<Control>,
}

/// A layer registration request.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledLayer {
    /// Surface layer id
    pub id: String,
    /// Data source the layer draws
    pub source: String,
    /// Fill or outline
    pub kind: GeometryKind,
    /// Static paint
    pub paint: Paint,
    /// Initial layout visibility
    pub visibility: Visibility,
}

/// A feature reported by a rendered-feature query.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    /// Surface layer the feature was rendered in
    pub layer_id: String,
    /// Feature attributes
    pub properties: Map<String, Value>,
}
