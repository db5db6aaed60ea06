//! Composition results.

use crate::catalog::LogicalLayer;
use crate::surface::SurfaceId;
use std::fmt;

/// A logical layer left out of a composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLayer {
    pub layer: LogicalLayer,
    /// Classified failure, as displayed
    pub reason: String,
}

/// Outcome of one composition pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionReport {
    /// Surface the pass composed
    pub surface: SurfaceId,
    /// Logical layers registered, in registration order
    pub registered: Vec<LogicalLayer>,
    /// Surface layer ids registered, bottom first
    pub surface_layers: Vec<String>,
    /// Logical layers that were skipped
    pub skipped: Vec<SkippedLayer>,
}

impl CompositionReport {
    pub(crate) fn new(surface: SurfaceId) -> Self {
        Self {
            surface,
            registered: Vec::new(),
            surface_layers: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Whether every logical layer made it onto the surface.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for CompositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} registered, {} skipped",
            self.surface,
            self.registered.len(),
            self.skipped.len()
        )
    }
}
