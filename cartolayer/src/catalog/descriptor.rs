//! Render-surface layer descriptors.

use std::fmt;

/// Geometry rendering style of a surface layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// Filled polygons
    Fill,
    /// Polygon outlines
    Outline,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fill => write!(f, "fill"),
            Self::Outline => write!(f, "outline"),
        }
    }
}

/// Static paint configuration applied when a surface layer is registered.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Polygon fill
    Fill {
        /// CSS colour
        color: String,
        /// Fill opacity in `0.0..=1.0`
        opacity: f32,
    },
    /// Polygon outline
    Line {
        /// CSS colour
        color: String,
        /// Line width in pixels
        width: f32,
    },
}

impl Paint {
    /// Fill paint.
    pub fn fill(color: &str, opacity: f32) -> Self {
        Self::Fill {
            color: color.to_string(),
            opacity,
        }
    }

    /// Line paint.
    pub fn line(color: &str, width: f32) -> Self {
        Self::Line {
            color: color.to_string(),
            width,
        }
    }
}

/// One layer on the render surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    /// Surface layer id, unique across the catalog
    pub id: String,
    /// How the geometry is drawn
    pub kind: GeometryKind,
    /// Static paint
    pub paint: Paint,
}

impl LayerDescriptor {
    /// Fill layer descriptor.
    pub fn fill(id: &str, color: &str, opacity: f32) -> Self {
        Self {
            id: id.to_string(),
            kind: GeometryKind::Fill,
            paint: Paint::fill(color, opacity),
        }
    }

    /// Outline layer descriptor.
    pub fn outline(id: &str, color: &str, width: f32) -> Self {
        Self {
            id: id.to_string(),
            kind: GeometryKind::Outline,
            paint: Paint::line(color, width),
        }
    }
}
