//! Catalog entries and lookups.

use super::descriptor::{GeometryKind, LayerDescriptor};
use super::layer::{CatalogError, LogicalLayer};

/// Everything the engine knows about one logical layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    /// Logical layer this entry describes
    pub name: LogicalLayer,
    /// Data source id on the render surface
    pub source_id: String,
    /// Geometry endpoint, relative to the configured data base
    pub endpoint: String,
    /// Hover priority, higher wins
    pub priority: u8,
    /// Whether pointer hover inspects this layer
    pub hoverable: bool,
    /// Feature property holding the display name
    pub label_property: String,
    /// Surface layers in registration order (fill before outline)
    pub descriptors: Vec<LayerDescriptor>,
}

/// A surface layer queried by hover resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverTarget {
    /// Surface layer id
    pub layer_id: String,
    /// Owning logical layer
    pub owner: LogicalLayer,
    /// Owner's hover priority
    pub priority: u8,
}

/// Static catalog of logical layers, in paint order (bottom first).
#[derive(Debug, Clone, PartialEq)]
pub struct LayerCatalog {
    entries: Vec<LayerEntry>,
}

impl LayerCatalog {
    /// Build a catalog from entries given in paint order.
    ///
    /// Every [`LogicalLayer`] must appear exactly once.
    pub fn new(entries: Vec<LayerEntry>) -> Result<Self, CatalogError> {
        for layer in LogicalLayer::ALL {
            match entries.iter().filter(|e| e.name == layer).count() {
                0 => return Err(CatalogError::MissingLayer(layer)),
                1 => {}
                _ => return Err(CatalogError::DuplicateLayer(layer)),
            }
        }
        Ok(Self { entries })
    }

    /// Entries in declared (paint) order.
    pub fn entries(&self) -> &[LayerEntry] {
        &self.entries
    }

    /// Logical layers in declared (paint) order.
    pub fn order(&self) -> Vec<LogicalLayer> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Entry for a logical layer.
    pub fn entry(&self, name: LogicalLayer) -> &LayerEntry {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .unwrap_or_else(|| unreachable!("catalog declares every logical layer"))
    }

    /// Surface layer descriptors owned by `name`, in registration order.
    pub fn layers_for(&self, name: LogicalLayer) -> &[LayerDescriptor] {
        &self.entry(name).descriptors
    }

    /// Hover priority rank of `name`.
    pub fn priority_of(&self, name: LogicalLayer) -> u8 {
        self.entry(name).priority
    }

    /// Logical layer owning a surface layer id.
    pub fn owner_of(&self, layer_id: &str) -> Option<LogicalLayer> {
        self.entries
            .iter()
            .find(|e| e.descriptors.iter().any(|d| d.id == layer_id))
            .map(|e| e.name)
    }

    /// Fill layers of hover-enabled entries, highest priority first.
    pub fn hover_targets(&self) -> Vec<HoverTarget> {
        let mut targets: Vec<HoverTarget> = self
            .entries
            .iter()
            .filter(|e| e.hoverable)
            .flat_map(|e| {
                e.descriptors
                    .iter()
                    .filter(|d| d.kind == GeometryKind::Fill)
                    .map(move |d| HoverTarget {
                        layer_id: d.id.clone(),
                        owner: e.name,
                        priority: e.priority,
                    })
            })
            .collect();
        targets.sort_by(|a, b| b.priority.cmp(&a.priority));
        targets
    }

    /// Replace the endpoint of one logical layer.
    pub fn with_endpoint(mut self, name: LogicalLayer, endpoint: impl Into<String>) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            entry.endpoint = endpoint.into();
        }
        self
    }
}

impl Default for LayerCatalog {
    /// French administrative boundaries.
    fn default() -> Self {
        Self {
            entries: vec![
                LayerEntry {
                    name: LogicalLayer::Departments,
                    source_id: "departments".to_string(),
                    endpoint: "departements.geojson".to_string(),
                    priority: 1,
                    hoverable: true,
                    label_property: "nom".to_string(),
                    descriptors: vec![
                        LayerDescriptor::fill("departments-fill", "#088", 0.1),
                        LayerDescriptor::outline("departments-outline", "#066", 2.0),
                    ],
                },
                LayerEntry {
                    name: LogicalLayer::Communes,
                    source_id: "communes".to_string(),
                    endpoint: "communes.geojson".to_string(),
                    priority: 2,
                    hoverable: false,
                    label_property: "nom".to_string(),
                    descriptors: vec![LayerDescriptor::outline("communes-outline", "#555", 0.5)],
                },
                LayerEntry {
                    name: LogicalLayer::Sections,
                    source_id: "sections".to_string(),
                    endpoint: "sections.geojson".to_string(),
                    priority: 3,
                    hoverable: true,
                    label_property: "nom".to_string(),
                    descriptors: vec![
                        LayerDescriptor::fill("sections-fill", "#f90", 0.2),
                        LayerDescriptor::outline("sections-outline", "#c60", 1.0),
                    ],
                },
            ],
        }
    }
}
