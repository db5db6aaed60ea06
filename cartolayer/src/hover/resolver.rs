//! Hover resolution and popup handling.

use crate::catalog::{HoverTarget, LayerCatalog, LogicalLayer};
use crate::surface::{Cursor, EventKind, LngLat, PopupId, RenderedFeature, ScreenPoint, Surface};
use std::collections::HashMap;
use tracing::trace;

/// Label shown for features without a display name.
pub const UNNAMED: &str = "Unnamed";

/// The feature currently under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverFeature {
    /// Logical layer the feature belongs to
    pub layer: LogicalLayer,
    /// Display name
    pub name: String,
    /// Pointer position
    pub position: LngLat,
}

/// The single popup reused across hovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupHandle {
    pub id: PopupId,
    pub shown: bool,
}

/// Picks the most relevant feature under the pointer and drives the popup.
pub struct HoverResolver {
    targets: Vec<HoverTarget>,
    target_ids: Vec<String>,
    labels: HashMap<LogicalLayer, String>,
    popup: Option<PopupHandle>,
    cursor: Cursor,
    current: Option<HoverFeature>,
}

impl HoverResolver {
    /// Engine events the resolver needs listeners for.
    pub const EVENTS: [EventKind; 2] = [EventKind::PointerMove, EventKind::PointerLeave];

    pub fn new(catalog: &LayerCatalog) -> Self {
        let targets = catalog.hover_targets();
        let target_ids = targets.iter().map(|t| t.layer_id.clone()).collect();
        let labels = catalog
            .entries()
            .iter()
            .map(|e| (e.name, e.label_property.clone()))
            .collect();

        Self {
            targets,
            target_ids,
            labels,
            popup: None,
            cursor: Cursor::Default,
            current: None,
        }
    }

    /// Surface layers queried on pointer movement, highest priority first.
    pub fn target_ids(&self) -> &[String] {
        &self.target_ids
    }

    /// The feature currently shown, if any.
    pub fn current(&self) -> Option<&HoverFeature> {
        self.current.as_ref()
    }

    /// The popup bound to the current surface.
    pub fn popup(&self) -> Option<PopupHandle> {
        self.popup
    }

    /// Bind to a freshly composed surface by creating its popup.
    pub fn attach<S: Surface>(&mut self, surface: &mut S) {
        self.popup = Some(PopupHandle {
            id: surface.create_popup(),
            shown: false,
        });
        self.cursor = Cursor::Default;
        self.current = None;
    }

    /// Forget the surface; its popup went with it.
    pub fn detach(&mut self) {
        self.popup = None;
        self.cursor = Cursor::Default;
        self.current = None;
    }

    /// Handle a pointer move.
    pub fn on_pointer_move<S: Surface>(
        &mut self,
        surface: &mut S,
        point: ScreenPoint,
        position: LngLat,
    ) -> Option<&HoverFeature> {
        let features = surface.query_rendered_features(point, &self.target_ids);

        match self.resolve(&features, position) {
            Some(feature) => {
                if let Some(popup) = self.popup.as_mut() {
                    surface.show_popup(popup.id, position, &feature.name);
                    popup.shown = true;
                }
                self.set_cursor(surface, Cursor::Pointer);
                trace!(layer = %feature.layer, name = %feature.name, "Hover resolved");
                self.current = Some(feature);
            }
            None => self.clear(surface),
        }
        self.current.as_ref()
    }

    /// Handle the pointer leaving the surface.
    pub fn on_pointer_leave<S: Surface>(&mut self, surface: &mut S) {
        self.clear(surface);
    }

    /// Pick the feature to show among `features` (engine order, topmost first).
    ///
    /// The owner with the highest priority wins; within one priority the
    /// engine's order decides.
    pub fn resolve(&self, features: &[RenderedFeature], position: LngLat) -> Option<HoverFeature> {
        let (target, feature) = features
            .iter()
            .filter_map(|f| {
                self.targets
                    .iter()
                    .find(|t| t.layer_id == f.layer_id)
                    .map(|t| (t, f))
            })
            .fold(None::<(&HoverTarget, &RenderedFeature)>, |best, candidate| {
                match best {
                    Some(b) if b.0.priority >= candidate.0.priority => Some(b),
                    _ => Some(candidate),
                }
            })?;

        let name = self
            .labels
            .get(&target.owner)
            .and_then(|key| feature.properties.get(key))
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(UNNAMED)
            .to_string();

        Some(HoverFeature {
            layer: target.owner,
            name,
            position,
        })
    }

    fn clear<S: Surface>(&mut self, surface: &mut S) {
        if let Some(popup) = self.popup.as_mut() {
            if popup.shown {
                surface.hide_popup(popup.id);
                popup.shown = false;
            }
        }
        self.set_cursor(surface, Cursor::Default);
        self.current = None;
    }

    fn set_cursor<S: Surface>(&mut self, surface: &mut S, cursor: Cursor) {
        if self.cursor != cursor {
            surface.set_cursor(cursor);
            self.cursor = cursor;
        }
    }
}
