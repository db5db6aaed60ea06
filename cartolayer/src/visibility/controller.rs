//! Pushing visibility state into the live surface.

use super::state::VisibilityState;
use crate::catalog::{LayerCatalog, LogicalLayer};
use crate::surface::{Surface, Visibility};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Owner of the [`VisibilityState`].
///
/// Remembers the visibility last pushed to each surface layer so that
/// pushing an unchanged value makes no engine call.
pub struct VisibilityController {
    catalog: Arc<LayerCatalog>,
    state: VisibilityState,
    pushed: HashMap<String, Visibility>,
}

impl VisibilityController {
    pub fn new(catalog: Arc<LayerCatalog>, state: VisibilityState) -> Self {
        Self {
            catalog,
            state,
            pushed: HashMap::new(),
        }
    }

    /// Current toggle state.
    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    /// Flip a layer and push it when a ready surface is given.
    ///
    /// Returns the new value.
    pub fn toggle<S: Surface>(&mut self, name: LogicalLayer, surface: Option<&mut S>) -> bool {
        let visible = self.state.toggle(name);
        debug!(layer = %name, visible, "Layer toggled");
        if let Some(surface) = surface {
            self.push_layer(name, surface);
        }
        visible
    }

    /// Set a layer and push it when a ready surface is given.
    pub fn set<S: Surface>(&mut self, name: LogicalLayer, visible: bool, surface: Option<&mut S>) {
        self.state.set(name, visible);
        if let Some(surface) = surface {
            self.push_layer(name, surface);
        }
    }

    /// Push the whole state.
    pub fn apply<S: Surface>(&mut self, surface: &mut S) {
        for name in self.catalog.order() {
            self.push_layer(name, surface);
        }
    }

    /// Record that a layer was registered with `visibility` already set.
    pub fn note_registered(&mut self, layer_id: &str, visibility: Visibility) {
        self.pushed.insert(layer_id.to_string(), visibility);
    }

    /// Drop everything remembered about the previous surface.
    pub fn forget_surface(&mut self) {
        self.pushed.clear();
    }

    fn push_layer<S: Surface>(&mut self, name: LogicalLayer, surface: &mut S) {
        let visibility = Visibility::from(self.state.get(name));
        let catalog = Arc::clone(&self.catalog);

        for descriptor in catalog.layers_for(name) {
            if !surface.has_layer(&descriptor.id) {
                trace!(layer = %descriptor.id, "Layer not registered, visibility push skipped");
                continue;
            }
            if self.pushed.get(&descriptor.id) == Some(&visibility) {
                continue;
            }
            match surface.set_visibility(&descriptor.id, visibility) {
                Ok(()) => {
                    self.pushed.insert(descriptor.id.clone(), visibility);
                }
                Err(e) => {
                    debug!(layer = %descriptor.id, error = %e, "Visibility push refused");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::GeometryCollection;
    use crate::surface::fake::{RecordingEngine, RecordingSurface, SurfaceCall};
    use crate::surface::{
        EventSink, LngLat, RenderEngine, StyledLayer, SurfaceConfig, SurfaceId,
    };
    use crate::style::{StyleKey, StyleRegistry};
    use tokio::sync::mpsc;

    fn surface_with_layers(
        engine: &mut RecordingEngine,
        catalog: &LayerCatalog,
        names: &[LogicalLayer],
    ) -> RecordingSurface {
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = SurfaceConfig {
            style: StyleRegistry::default().resolve(StyleKey::Terrain).unwrap().clone(),
            center: LngLat::new(0.0, 0.0),
            zoom: 1.0,
            controls: Vec::new(),
        };
        let mut surface = engine.create(&config, EventSink::new(SurfaceId(1), tx)).unwrap();
        for name in names {
            let entry = catalog.entry(*name);
            surface
                .add_source(&entry.source_id, &GeometryCollection::new(vec![]))
                .unwrap();
            for d in &entry.descriptors {
                surface
                    .add_layer(StyledLayer {
                        id: d.id.clone(),
                        source: entry.source_id.clone(),
                        kind: d.kind,
                        paint: d.paint.clone(),
                        visibility: Visibility::Visible,
                    })
                    .unwrap();
            }
        }
        engine.clear_journal();
        surface
    }

    fn visibility_calls(engine: &RecordingEngine) -> Vec<(String, Visibility)> {
        engine
            .journal()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::SetVisibility(_, id, v) => Some((id, v)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_apply_pushes_every_owned_layer() {
        let catalog = Arc::new(LayerCatalog::default());
        let mut engine = RecordingEngine::new();
        let mut surface = surface_with_layers(&mut engine, &catalog, &LogicalLayer::ALL);
        let mut controller = VisibilityController::new(catalog, VisibilityState::default());

        controller.apply(&mut surface);

        assert_eq!(
            visibility_calls(&engine),
            vec![
                ("departments-fill".to_string(), Visibility::Visible),
                ("departments-outline".to_string(), Visibility::Visible),
                ("communes-outline".to_string(), Visibility::Hidden),
                ("sections-fill".to_string(), Visibility::Visible),
                ("sections-outline".to_string(), Visibility::Visible),
            ]
        );
    }

    #[test]
    fn test_toggle_pushes_only_that_layer() {
        let catalog = Arc::new(LayerCatalog::default());
        let mut engine = RecordingEngine::new();
        let mut surface = surface_with_layers(&mut engine, &catalog, &LogicalLayer::ALL);
        let mut controller = VisibilityController::new(catalog, VisibilityState::default());
        controller.apply(&mut surface);
        engine.clear_journal();

        let visible = controller.toggle(LogicalLayer::Communes, Some(&mut surface));

        assert!(visible);
        assert_eq!(
            visibility_calls(&engine),
            vec![("communes-outline".to_string(), Visibility::Visible)]
        );
    }

    #[test]
    fn test_repeated_push_is_a_no_op() {
        let catalog = Arc::new(LayerCatalog::default());
        let mut engine = RecordingEngine::new();
        let mut surface = surface_with_layers(&mut engine, &catalog, &LogicalLayer::ALL);
        let mut controller = VisibilityController::new(catalog, VisibilityState::default());

        controller.apply(&mut surface);
        engine.clear_journal();
        controller.apply(&mut surface);
        controller.set(LogicalLayer::Sections, true, Some(&mut surface));

        assert!(visibility_calls(&engine).is_empty());
    }

    #[test]
    fn test_missing_layers_are_skipped() {
        let catalog = Arc::new(LayerCatalog::default());
        let mut engine = RecordingEngine::new();
        let mut surface =
            surface_with_layers(&mut engine, &catalog, &[LogicalLayer::Departments]);
        let mut controller = VisibilityController::new(catalog, VisibilityState::default());

        controller.toggle(LogicalLayer::Sections, Some(&mut surface));
        controller.apply(&mut surface);

        let ids: Vec<_> = visibility_calls(&engine).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["departments-fill", "departments-outline"]);
    }

    #[test]
    fn test_toggle_without_surface_only_updates_state() {
        let catalog = Arc::new(LayerCatalog::default());
        let mut controller = VisibilityController::new(catalog, VisibilityState::default());

        controller.toggle::<RecordingSurface>(LogicalLayer::Departments, None);

        assert!(!controller.state().get(LogicalLayer::Departments));
    }

    #[test]
    fn test_forget_surface_allows_repush() {
        let catalog = Arc::new(LayerCatalog::default());
        let mut engine = RecordingEngine::new();
        let mut surface = surface_with_layers(&mut engine, &catalog, &LogicalLayer::ALL);
        let mut controller = VisibilityController::new(catalog, VisibilityState::default());
        controller.apply(&mut surface);
        engine.clear_journal();

        controller.forget_surface();
        controller.apply(&mut surface);

        assert_eq!(visibility_calls(&engine).len(), 5);
    }
}
