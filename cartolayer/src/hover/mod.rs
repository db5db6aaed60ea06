//! Pointer hover inspection.
//!
//! On every pointer move the [`HoverResolver`] queries the hover-enabled
//! fill layers and keeps the feature whose logical layer has the highest
//! priority rank, showing its name in a single reused popup.

mod resolver;

pub use resolver::{HoverFeature, HoverResolver, PopupHandle, UNNAMED};
