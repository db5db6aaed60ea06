//! Geometry collection types and load errors.

use crate::catalog::LogicalLayer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Per-layer load failures. Both are recoverable: the composer skips the
/// layer and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The geometry endpoint could not be read
    #[error("Failed to fetch {layer} geometry from {location}: {reason}")]
    FetchFailed {
        layer: LogicalLayer,
        location: String,
        reason: String,
    },

    /// The payload is not a feature collection
    #[error("Failed to decode {layer} geometry: {reason}")]
    DecodeFailed { layer: LogicalLayer, reason: String },
}

impl LoadError {
    /// Layer the failure belongs to.
    pub fn layer(&self) -> LogicalLayer {
        match self {
            Self::FetchFailed { layer, .. } | Self::DecodeFailed { layer, .. } => *layer,
        }
    }
}

/// A longitude/latitude position; extra ordinates (altitude) are kept but ignored.
pub type Position = Vec<f64>;

/// Feature geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    /// Any geometry type the engine does not inspect.
    #[serde(other)]
    Other,
}

/// A single geographic feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Geometry, absent for attribute-only features
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Feature attributes
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

impl Feature {
    /// String value of a property, if present and a string.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

/// A decoded feature collection for one logical layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    #[serde(rename = "type")]
    kind: String,
    /// Features in document order
    pub features: Vec<Feature>,
}

impl GeometryCollection {
    /// Build a collection from features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }

    /// Decode a collection for `layer` from raw bytes.
    pub fn decode(layer: LogicalLayer, bytes: &[u8]) -> Result<Self, LoadError> {
        let collection: Self =
            serde_json::from_slice(bytes).map_err(|e| LoadError::DecodeFailed {
                layer,
                reason: e.to_string(),
            })?;

        if collection.kind != "FeatureCollection" {
            return Err(LoadError::DecodeFailed {
                layer,
                reason: format!("expected a FeatureCollection, found '{}'", collection.kind),
            });
        }

        Ok(collection)
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}
