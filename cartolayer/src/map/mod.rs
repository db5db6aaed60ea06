//! Map composition and interaction.
//!
//! [`MapController`] ties the components together:
//!
//! ```text
//! start / SetBase ──▶ SurfaceLifecycle::reinit ──▶ (engine) Ready
//!                                                      │
//!                         LayerComposer::begin ◀───────┘
//!                               │  LayerLoaded × 3 (catalog order)
//!                               ▼
//!                  CompositionFinished ──▶ VisibilityController::apply
//!                                     └──▶ HoverResolver::attach + listeners
//! ```
//!
//! Toggles only go through the visibility controller and never rebuild
//! the surface.

mod controller;
mod error;
mod event;
mod handle;

pub use controller::{MapController, MapOptions, DEFAULT_CENTER, DEFAULT_ZOOM};
pub use error::{ErrorReporter, LogReporter, MapError};
pub use event::MapEvent;
pub use handle::MapHandle;
