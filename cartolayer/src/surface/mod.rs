//! Render surface capability and lifecycle.
//!
//! The rendering engine is an external collaborator consumed through the
//! [`RenderEngine`] and [`Surface`] traits. [`SurfaceLifecycle`] owns the
//! single live surface and implements the state machine
//!
//! ```text
//! Uninitialized ──reinit──▶ Creating ──ready──▶ Ready
//!       ▲                      │                  │
//!       │                      └──reinit/teardown─┴──▶ Destroyed ──reinit──▶ Creating
//! ```
//!
//! Every surface gets a fresh [`SurfaceId`]. Engine events carry that id
//! through the [`EventSink`], so callbacks from a destroyed surface are
//! recognised and dropped.
//!
//! [`HeadlessEngine`] is an in-memory engine used by the CLI and by
//! integration tests.

mod engine;
mod headless;
mod lifecycle;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use engine::{EventSink, RenderEngine, Surface};
pub use headless::{HeadlessEngine, HeadlessSurface, LayerState, SurfaceSnapshot};
pub use lifecycle::{LifecycleState, ReadySignal, SurfaceLifecycle};
pub use types::{
    Control, Cursor, EventKind, ListenerId, LngLat, PopupId, RenderedFeature, ScreenPoint,
    StyledLayer, SurfaceConfig, SurfaceError, SurfaceId, Visibility,
};
