//! Rendering engine capability traits.

use super::types::{
    Control, Cursor, EventKind, ListenerId, LngLat, PopupId, RenderedFeature, ScreenPoint,
    StyledLayer, SurfaceConfig, SurfaceError, SurfaceId, Visibility,
};
use crate::loader::GeometryCollection;
use crate::map::MapEvent;
use tokio::sync::mpsc;

/// A live render surface bound to one basemap style.
///
/// All methods are called from the controller's event loop; none of them
/// may block on I/O.
pub trait Surface {
    /// Add a built-in control.
    fn add_control(&mut self, control: Control);

    /// Register a data source.
    fn add_source(&mut self, id: &str, data: &GeometryCollection) -> Result<(), SurfaceError>;

    /// Register a styled layer on top of the current stack.
    ///
    /// The layer's source must already be registered.
    fn add_layer(&mut self, layer: StyledLayer) -> Result<(), SurfaceError>;

    /// Whether a layer id is registered.
    fn has_layer(&self, id: &str) -> bool;

    /// Set the `visibility` layout property of a layer.
    fn set_visibility(&mut self, layer_id: &str, visibility: Visibility)
        -> Result<(), SurfaceError>;

    /// Features rendered at `point` in the given layers, topmost first.
    fn query_rendered_features(
        &self,
        point: ScreenPoint,
        layer_ids: &[String],
    ) -> Vec<RenderedFeature>;

    /// Subscribe to an engine event; the engine forwards it to the
    /// [`EventSink`] it was created with.
    fn on(&mut self, kind: EventKind) -> ListenerId;

    /// Unsubscribe a listener.
    fn off(&mut self, listener: ListenerId);

    /// Set the pointer cursor.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Create a detached popup overlay.
    fn create_popup(&mut self) -> PopupId;

    /// Attach a popup at `at` with a text label, moving it if already shown.
    fn show_popup(&mut self, popup: PopupId, at: LngLat, label: &str);

    /// Detach a popup without destroying it.
    fn hide_popup(&mut self, popup: PopupId);

    /// Destroy the surface and everything bound to it.
    fn remove(self)
    where
        Self: Sized;
}

/// Factory for render surfaces.
pub trait RenderEngine {
    type Surface: Surface;

    /// Create a surface. The engine signals readiness later through
    /// [`EventSink::ready`].
    fn create(
        &mut self,
        config: &SurfaceConfig,
        sink: EventSink,
    ) -> Result<Self::Surface, SurfaceError>;
}

/// Channel through which an engine reports events for one surface.
///
/// Every event is stamped with the surface id, so the controller can drop
/// events that outlive their surface.
#[derive(Debug, Clone)]
pub struct EventSink {
    surface: SurfaceId,
    tx: mpsc::UnboundedSender<MapEvent>,
}

impl EventSink {
    pub(crate) fn new(surface: SurfaceId, tx: mpsc::UnboundedSender<MapEvent>) -> Self {
        Self { surface, tx }
    }

    /// Surface this sink reports for.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// The surface finished loading its style.
    pub fn ready(&self) {
        self.send(MapEvent::Ready {
            surface: self.surface,
        });
    }

    /// The pointer moved over the surface.
    pub fn pointer_move(&self, point: ScreenPoint, position: LngLat) {
        self.send(MapEvent::PointerMove {
            surface: self.surface,
            point,
            position,
        });
    }

    /// The pointer left the surface.
    pub fn pointer_leave(&self) {
        self.send(MapEvent::PointerLeave {
            surface: self.surface,
        });
    }

    fn send(&self, event: MapEvent) {
        // The controller is gone; nothing is listening any more.
        let _ = self.tx.send(event);
    }
}
