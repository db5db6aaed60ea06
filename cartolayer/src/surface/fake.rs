//! Recording engine for unit tests.

use super::engine::{EventSink, RenderEngine, Surface};
use super::types::{
    Control, Cursor, EventKind, ListenerId, LngLat, PopupId, RenderedFeature, ScreenPoint,
    StyledLayer, SurfaceConfig, SurfaceError, SurfaceId, Visibility,
};
use crate::loader::GeometryCollection;
use crate::style::StyleKey;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// One capability call, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Create(SurfaceId, StyleKey),
    AddControl(SurfaceId, Control),
    AddSource(SurfaceId, String),
    AddLayer(SurfaceId, String, Visibility),
    SetVisibility(SurfaceId, String, Visibility),
    Query(SurfaceId, Vec<String>),
    On(SurfaceId, EventKind, ListenerId),
    Off(SurfaceId, ListenerId),
    SetCursor(SurfaceId, Cursor),
    CreatePopup(SurfaceId, PopupId),
    ShowPopup(SurfaceId, PopupId, String),
    HidePopup(SurfaceId, PopupId),
    Remove(SurfaceId),
}

#[derive(Default)]
struct Shared {
    journal: Vec<SurfaceCall>,
    sinks: HashMap<SurfaceId, EventSink>,
    alive: HashSet<SurfaceId>,
    query_result: Vec<RenderedFeature>,
    fail_next_create: bool,
    next_handle: u64,
}

/// Engine whose surfaces append every call to a shared journal.
#[derive(Clone, Default)]
pub struct RecordingEngine {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn journal(&self) -> Vec<SurfaceCall> {
        self.shared.lock().unwrap().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.shared.lock().unwrap().journal.clear();
    }

    pub fn alive(&self) -> usize {
        self.shared.lock().unwrap().alive.len()
    }

    /// Sink handed to the engine for surface `id`.
    pub fn sink(&self, id: SurfaceId) -> EventSink {
        self.shared.lock().unwrap().sinks[&id].clone()
    }

    /// Features returned by every subsequent query.
    pub fn set_query_result(&self, features: Vec<RenderedFeature>) {
        self.shared.lock().unwrap().query_result = features;
    }

    pub fn fail_next_create(&self) {
        self.shared.lock().unwrap().fail_next_create = true;
    }
}

impl RenderEngine for RecordingEngine {
    type Surface = RecordingSurface;

    fn create(
        &mut self,
        config: &SurfaceConfig,
        sink: EventSink,
    ) -> Result<RecordingSurface, SurfaceError> {
        let mut shared = self.shared.lock().unwrap();
        if shared.fail_next_create {
            shared.fail_next_create = false;
            return Err(SurfaceError::CreateFailed("scripted failure".to_string()));
        }

        let id = sink.surface();
        shared.journal.push(SurfaceCall::Create(id, config.style.key));
        shared.sinks.insert(id, sink);
        shared.alive.insert(id);

        Ok(RecordingSurface {
            id,
            shared: Arc::clone(&self.shared),
            sources: HashSet::new(),
            layers: HashSet::new(),
        })
    }
}

/// Surface of a [`RecordingEngine`].
pub struct RecordingSurface {
    id: SurfaceId,
    shared: Arc<Mutex<Shared>>,
    sources: HashSet<String>,
    layers: HashSet<String>,
}

impl RecordingSurface {
    fn record(&self, call: SurfaceCall) {
        self.shared.lock().unwrap().journal.push(call);
    }

    fn handle(&self) -> u64 {
        let mut shared = self.shared.lock().unwrap();
        shared.next_handle += 1;
        shared.next_handle
    }
}

impl Surface for RecordingSurface {
    fn add_control(&mut self, control: Control) {
        self.record(SurfaceCall::AddControl(self.id, control));
    }

    fn add_source(&mut self, id: &str, _data: &GeometryCollection) -> Result<(), SurfaceError> {
        self.record(SurfaceCall::AddSource(self.id, id.to_string()));
        self.sources.insert(id.to_string());
        Ok(())
    }

    fn add_layer(&mut self, layer: StyledLayer) -> Result<(), SurfaceError> {
        if !self.sources.contains(&layer.source) {
            return Err(SurfaceError::LayerRejected {
                id: layer.id,
                reason: "source missing".to_string(),
            });
        }
        self.record(SurfaceCall::AddLayer(self.id, layer.id.clone(), layer.visibility));
        self.layers.insert(layer.id);
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.contains(id)
    }

    fn set_visibility(
        &mut self,
        layer_id: &str,
        visibility: Visibility,
    ) -> Result<(), SurfaceError> {
        if !self.layers.contains(layer_id) {
            return Err(SurfaceError::UnknownLayer(layer_id.to_string()));
        }
        self.record(SurfaceCall::SetVisibility(
            self.id,
            layer_id.to_string(),
            visibility,
        ));
        Ok(())
    }

    fn query_rendered_features(
        &self,
        _point: ScreenPoint,
        layer_ids: &[String],
    ) -> Vec<RenderedFeature> {
        self.record(SurfaceCall::Query(self.id, layer_ids.to_vec()));
        self.shared
            .lock()
            .unwrap()
            .query_result
            .iter()
            .filter(|f| layer_ids.contains(&f.layer_id))
            .cloned()
            .collect()
    }

    fn on(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.handle());
        self.record(SurfaceCall::On(self.id, kind, id));
        id
    }

    fn off(&mut self, listener: ListenerId) {
        self.record(SurfaceCall::Off(self.id, listener));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.record(SurfaceCall::SetCursor(self.id, cursor));
    }

    fn create_popup(&mut self) -> PopupId {
        let id = PopupId(self.handle());
        self.record(SurfaceCall::CreatePopup(self.id, id));
        id
    }

    fn show_popup(&mut self, popup: PopupId, _at: LngLat, label: &str) {
        self.record(SurfaceCall::ShowPopup(self.id, popup, label.to_string()));
    }

    fn hide_popup(&mut self, popup: PopupId) {
        self.record(SurfaceCall::HidePopup(self.id, popup));
    }

    fn remove(self) {
        let mut shared = self.shared.lock().unwrap();
        shared.journal.push(SurfaceCall::Remove(self.id));
        shared.alive.remove(&self.id);
    }
}
