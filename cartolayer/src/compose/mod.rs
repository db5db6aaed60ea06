//! Composition of the layer stack onto a ready surface.

mod composer;
mod report;

pub use composer::LayerComposer;
pub use report::{CompositionReport, SkippedLayer};
