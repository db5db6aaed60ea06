//! In-memory rendering engine.
//!
//! [`HeadlessEngine`] keeps everything a real engine would draw (sources,
//! the paint-ordered layer stack, layout visibility, listeners, popup and
//! cursor) without drawing anything. It uses an identity projection: a
//! screen point `(x, y)` is the geographic position `(x, y)`.

use super::engine::{EventSink, RenderEngine, Surface};
use super::types::{
    Control, Cursor, EventKind, ListenerId, LngLat, PopupId, RenderedFeature, ScreenPoint,
    StyledLayer, SurfaceConfig, SurfaceError, SurfaceId, Visibility,
};
use crate::catalog::GeometryKind;
use crate::loader::{Geometry, GeometryCollection, Position};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

/// State of one layer in a [`SurfaceSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    pub id: String,
    pub source: String,
    pub kind: GeometryKind,
    pub visibility: Visibility,
}

/// Observable state of the live headless surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSnapshot {
    pub id: SurfaceId,
    pub style_url: String,
    pub center: LngLat,
    pub zoom: f64,
    pub controls: Vec<Control>,
    /// Registered source ids, in registration order
    pub sources: Vec<String>,
    /// Layer stack, bottom first
    pub layers: Vec<LayerState>,
    pub listeners: usize,
    pub cursor: Cursor,
    /// Position and label of the shown popup
    pub popup: Option<(LngLat, String)>,
}

impl SurfaceSnapshot {
    /// Ids of visible layers, bottom first.
    pub fn visible_layers(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|l| l.visibility.is_visible())
            .map(|l| l.id.as_str())
            .collect()
    }

    /// Visibility of a layer, if registered.
    pub fn visibility_of(&self, id: &str) -> Option<Visibility> {
        self.layers.iter().find(|l| l.id == id).map(|l| l.visibility)
    }
}

struct HeadlessState {
    config: SurfaceConfig,
    sink: EventSink,
    controls: Vec<Control>,
    sources: Vec<(String, GeometryCollection)>,
    layers: Vec<StyledLayer>,
    listeners: HashMap<ListenerId, EventKind>,
    cursor: Cursor,
    popups: HashMap<PopupId, Option<(LngLat, String)>>,
}

impl HeadlessState {
    fn has_listener(&self, kind: EventKind) -> bool {
        self.listeners.values().any(|k| *k == kind)
    }

    fn source(&self, id: &str) -> Option<&GeometryCollection> {
        self.sources.iter().find(|(s, _)| s == id).map(|(_, c)| c)
    }

    fn snapshot(&self, id: SurfaceId) -> SurfaceSnapshot {
        SurfaceSnapshot {
            id,
            style_url: self.config.style.url.clone(),
            center: self.config.center,
            zoom: self.config.zoom,
            controls: self.controls.clone(),
            sources: self.sources.iter().map(|(s, _)| s.clone()).collect(),
            layers: self
                .layers
                .iter()
                .map(|l| LayerState {
                    id: l.id.clone(),
                    source: l.source.clone(),
                    kind: l.kind,
                    visibility: l.visibility,
                })
                .collect(),
            listeners: self.listeners.len(),
            cursor: self.cursor,
            popup: self.popups.values().find_map(|p| p.clone()),
        }
    }
}

#[derive(Default)]
struct HeadlessWorld {
    surfaces: BTreeMap<SurfaceId, HeadlessState>,
    created: usize,
    max_alive: usize,
    next_handle: u64,
}

impl HeadlessWorld {
    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn latest(&self) -> Option<(&SurfaceId, &HeadlessState)> {
        self.surfaces.iter().next_back()
    }
}

/// In-memory [`RenderEngine`].
///
/// Clones share the same world, so a caller can keep a clone to inspect
/// surfaces and inject pointer input after handing the engine to a
/// controller.
#[derive(Clone, Default)]
pub struct HeadlessEngine {
    world: Arc<Mutex<HeadlessWorld>>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn world(&self) -> MutexGuard<'_, HeadlessWorld> {
        self.world.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// State of the most recently created live surface.
    pub fn snapshot(&self) -> Option<SurfaceSnapshot> {
        let world = self.world();
        world.latest().map(|(id, state)| state.snapshot(*id))
    }

    /// Surfaces currently alive.
    pub fn alive(&self) -> usize {
        self.world().surfaces.len()
    }

    /// Surfaces created since the engine was built.
    pub fn created(&self) -> usize {
        self.world().created
    }

    /// Highest number of surfaces ever alive at the same time.
    pub fn max_alive(&self) -> usize {
        self.world().max_alive
    }

    /// Simulate the pointer moving to `position` on the live surface.
    ///
    /// Returns whether a listener received the event.
    pub fn pointer_move(&self, position: LngLat) -> bool {
        let world = self.world();
        match world.latest() {
            Some((_, state)) if state.has_listener(EventKind::PointerMove) => {
                let point = ScreenPoint::new(position.lng, position.lat);
                state.sink.pointer_move(point, position);
                true
            }
            _ => false,
        }
    }

    /// Simulate the pointer leaving the live surface.
    pub fn pointer_leave(&self) -> bool {
        let world = self.world();
        match world.latest() {
            Some((_, state)) if state.has_listener(EventKind::PointerLeave) => {
                state.sink.pointer_leave();
                true
            }
            _ => false,
        }
    }
}

impl RenderEngine for HeadlessEngine {
    type Surface = HeadlessSurface;

    fn create(
        &mut self,
        config: &SurfaceConfig,
        sink: EventSink,
    ) -> Result<HeadlessSurface, SurfaceError> {
        if config.style.url.is_empty() {
            return Err(SurfaceError::CreateFailed(format!(
                "style '{}' has no descriptor URL",
                config.style.key
            )));
        }

        let id = sink.surface();
        let mut world = self.world();
        world.surfaces.insert(
            id,
            HeadlessState {
                config: config.clone(),
                sink: sink.clone(),
                controls: Vec::new(),
                sources: Vec::new(),
                layers: Vec::new(),
                listeners: HashMap::new(),
                cursor: Cursor::Default,
                popups: HashMap::new(),
            },
        );
        world.created += 1;
        world.max_alive = world.max_alive.max(world.surfaces.len());
        drop(world);

        // Style documents are not fetched, so the surface is ready at once.
        sink.ready();

        Ok(HeadlessSurface {
            id,
            world: Arc::clone(&self.world),
        })
    }
}

/// A surface of the [`HeadlessEngine`].
pub struct HeadlessSurface {
    id: SurfaceId,
    world: Arc<Mutex<HeadlessWorld>>,
}

impl HeadlessSurface {
    fn with_state<R>(&self, f: impl FnOnce(&mut HeadlessState) -> R) -> Option<R> {
        let mut world = self.world.lock().unwrap_or_else(|e| e.into_inner());
        world.surfaces.get_mut(&self.id).map(f)
    }
}

impl Surface for HeadlessSurface {
    fn add_control(&mut self, control: Control) {
        self.with_state(|s| s.controls.push(control));
    }

    fn add_source(&mut self, id: &str, data: &GeometryCollection) -> Result<(), SurfaceError> {
        self.with_state(|s| {
            if s.source(id).is_some() {
                return Err(SurfaceError::SourceRejected {
                    id: id.to_string(),
                    reason: "already registered".to_string(),
                });
            }
            s.sources.push((id.to_string(), data.clone()));
            Ok(())
        })
        .unwrap_or_else(|| Err(SurfaceError::CreateFailed("surface removed".to_string())))
    }

    fn add_layer(&mut self, layer: StyledLayer) -> Result<(), SurfaceError> {
        self.with_state(|s| {
            if s.source(&layer.source).is_none() {
                return Err(SurfaceError::LayerRejected {
                    reason: format!("source '{}' is not registered", layer.source),
                    id: layer.id,
                });
            }
            if s.layers.iter().any(|l| l.id == layer.id) {
                return Err(SurfaceError::LayerRejected {
                    id: layer.id,
                    reason: "already registered".to_string(),
                });
            }
            trace!(layer = %layer.id, visibility = layer.visibility.as_str(), "Headless layer added");
            s.layers.push(layer);
            Ok(())
        })
        .unwrap_or_else(|| Err(SurfaceError::CreateFailed("surface removed".to_string())))
    }

    fn has_layer(&self, id: &str) -> bool {
        self.with_state(|s| s.layers.iter().any(|l| l.id == id))
            .unwrap_or(false)
    }

    fn set_visibility(
        &mut self,
        layer_id: &str,
        visibility: Visibility,
    ) -> Result<(), SurfaceError> {
        self.with_state(|s| match s.layers.iter_mut().find(|l| l.id == layer_id) {
            Some(layer) => {
                layer.visibility = visibility;
                Ok(())
            }
            None => Err(SurfaceError::UnknownLayer(layer_id.to_string())),
        })
        .unwrap_or_else(|| Err(SurfaceError::UnknownLayer(layer_id.to_string())))
    }

    fn query_rendered_features(
        &self,
        point: ScreenPoint,
        layer_ids: &[String],
    ) -> Vec<RenderedFeature> {
        self.with_state(|s| {
            let mut hits = Vec::new();
            for layer in s.layers.iter().rev() {
                if !layer.visibility.is_visible()
                    || layer.kind != GeometryKind::Fill
                    || !layer_ids.iter().any(|id| *id == layer.id)
                {
                    continue;
                }
                let Some(source) = s.source(&layer.source) else {
                    continue;
                };
                for feature in source.features.iter().rev() {
                    let hit = feature
                        .geometry
                        .as_ref()
                        .is_some_and(|g| geometry_contains(g, point.x, point.y));
                    if hit {
                        hits.push(RenderedFeature {
                            layer_id: layer.id.clone(),
                            properties: feature.properties.clone(),
                        });
                    }
                }
            }
            hits
        })
        .unwrap_or_default()
    }

    fn on(&mut self, kind: EventKind) -> ListenerId {
        let mut world = self.world.lock().unwrap_or_else(|e| e.into_inner());
        let id = ListenerId(world.next_handle());
        if let Some(state) = world.surfaces.get_mut(&self.id) {
            state.listeners.insert(id, kind);
        }
        id
    }

    fn off(&mut self, listener: ListenerId) {
        self.with_state(|s| s.listeners.remove(&listener));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.with_state(|s| s.cursor = cursor);
    }

    fn create_popup(&mut self) -> PopupId {
        let mut world = self.world.lock().unwrap_or_else(|e| e.into_inner());
        let id = PopupId(world.next_handle());
        if let Some(state) = world.surfaces.get_mut(&self.id) {
            state.popups.insert(id, None);
        }
        id
    }

    fn show_popup(&mut self, popup: PopupId, at: LngLat, label: &str) {
        self.with_state(|s| {
            if let Some(slot) = s.popups.get_mut(&popup) {
                *slot = Some((at, label.to_string()));
            }
        });
    }

    fn hide_popup(&mut self, popup: PopupId) {
        self.with_state(|s| {
            if let Some(slot) = s.popups.get_mut(&popup) {
                *slot = None;
            }
        });
    }

    fn remove(self) {
        let mut world = self.world.lock().unwrap_or_else(|e| e.into_inner());
        world.surfaces.remove(&self.id);
    }
}

fn geometry_contains(geometry: &Geometry, x: f64, y: f64) -> bool {
    match geometry {
        Geometry::Polygon { coordinates } => polygon_contains(coordinates, x, y),
        Geometry::MultiPolygon { coordinates } => {
            coordinates.iter().any(|p| polygon_contains(p, x, y))
        }
        _ => false,
    }
}

/// Even-odd test over every ring, so holes exclude their interior.
fn polygon_contains(rings: &[Vec<Position>], x: f64, y: f64) -> bool {
    let mut inside = false;
    for ring in rings {
        let points: Vec<(f64, f64)> = ring
            .iter()
            .filter(|p| p.len() >= 2)
            .map(|p| (p[0], p[1]))
            .collect();
        if points.len() < 3 {
            continue;
        }
        let mut j = points.len() - 1;
        for i in 0..points.len() {
            let (xi, yi) = points[i];
            let (xj, yj) = points[j];
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}
