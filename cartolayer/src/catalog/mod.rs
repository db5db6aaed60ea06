//! Logical layer catalog.
//!
//! A [`LogicalLayer`] is one thematic layer the user can toggle
//! (departments, communes, sections). Each one owns a data source and one
//! or more render-surface layers, described by [`LayerDescriptor`]s.
//!
//! ```text
//! LayerCatalog (declared order = paint order, bottom to top)
//! ├── departments  source: departments  → departments-fill, departments-outline
//! ├── communes     source: communes     → communes-outline
//! └── sections     source: sections     → sections-fill, sections-outline
//! ```
//!
//! Hover resolution does not rely on this order: every entry carries an
//! explicit priority rank.

mod descriptor;
mod entry;
mod layer;

pub use descriptor::{GeometryKind, LayerDescriptor, Paint};
pub use entry::{HoverTarget, LayerCatalog, LayerEntry};
pub use layer::{CatalogError, LogicalLayer};
