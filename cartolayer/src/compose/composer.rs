//! Layer stack composition.

use super::report::{CompositionReport, SkippedLayer};
use crate::catalog::{LayerCatalog, LogicalLayer};
use crate::loader::{DataLoader, GeometryCollection, GeometryFetcher, LoadError};
use crate::map::{MapError, MapEvent};
use crate::surface::{Surface, StyledLayer, SurfaceId, Visibility};
use crate::visibility::VisibilityController;
use futures::stream::{FuturesOrdered, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Loads every logical layer and registers it on a ready surface.
///
/// Fetching runs in a spawned task that issues all loads at once but
/// reports them in catalog order, so registration (done by the caller on
/// the event loop through [`register`](Self::register)) always follows
/// paint order regardless of which fetch finishes first.
pub struct LayerComposer<F> {
    catalog: Arc<LayerCatalog>,
    loader: Arc<DataLoader<F>>,
    progress: Option<CompositionReport>,
}

impl<F: GeometryFetcher + 'static> LayerComposer<F> {
    pub fn new(catalog: Arc<LayerCatalog>, loader: Arc<DataLoader<F>>) -> Self {
        Self {
            catalog,
            loader,
            progress: None,
        }
    }

    /// Surface of the composition in progress.
    pub fn composing(&self) -> Option<SurfaceId> {
        self.progress.as_ref().map(|p| p.surface)
    }

    /// Start a composition pass for `surface`.
    ///
    /// Emits one [`MapEvent::LayerLoaded`] per logical layer in catalog
    /// order, then [`MapEvent::CompositionFinished`]. Nothing is emitted
    /// once `cancel` fires.
    pub fn begin(
        &mut self,
        surface: SurfaceId,
        cancel: CancellationToken,
        tx: mpsc::UnboundedSender<MapEvent>,
    ) {
        self.progress = Some(CompositionReport::new(surface));
        let order = self.catalog.order();
        let loader = Arc::clone(&self.loader);
        info!(surface = %surface, layers = order.len(), "Composition started");

        tokio::spawn(async move {
            let mut pending: FuturesOrdered<_> = order
                .into_iter()
                .map(|layer| {
                    let loader = Arc::clone(&loader);
                    async move { (layer, loader.load(layer).await) }
                })
                .collect();

            loop {
                tokio::select! {
                    biased;

                    _ = cancel.cancelled() => {
                        debug!(surface = %surface, in_flight = pending.len(), "Composition cancelled");
                        return;
                    }

                    next = pending.next() => match next {
                        Some((layer, result)) => {
                            if tx.send(MapEvent::LayerLoaded { surface, layer, result }).is_err() {
                                return;
                            }
                        }
                        None => break,
                    }
                }
            }

            let _ = tx.send(MapEvent::CompositionFinished { surface });
        });
    }

    /// Register the sources and layers of one loaded logical layer.
    ///
    /// The source is registered before any of its layers; each layer starts
    /// with the visibility currently stored in `visibility`. On failure the
    /// layer is recorded as skipped and the error returned for reporting.
    pub fn register<S: Surface>(
        &mut self,
        surface: &mut S,
        layer: LogicalLayer,
        result: Result<GeometryCollection, LoadError>,
        visibility: &mut VisibilityController,
    ) -> Result<(), MapError> {
        let outcome = result
            .map_err(MapError::from)
            .and_then(|collection| self.register_loaded(surface, layer, &collection, visibility));

        if let Some(progress) = self.progress.as_mut() {
            match &outcome {
                Ok(()) => progress.registered.push(layer),
                Err(e) => progress.skipped.push(SkippedLayer {
                    layer,
                    reason: e.to_string(),
                }),
            }
        }
        outcome
    }

    fn register_loaded<S: Surface>(
        &mut self,
        surface: &mut S,
        layer: LogicalLayer,
        collection: &GeometryCollection,
        visibility: &mut VisibilityController,
    ) -> Result<(), MapError> {
        let entry = self.catalog.entry(layer);
        surface.add_source(&entry.source_id, collection)?;

        let initial = Visibility::from(visibility.state().get(layer));
        for descriptor in &entry.descriptors {
            surface.add_layer(StyledLayer {
                id: descriptor.id.clone(),
                source: entry.source_id.clone(),
                kind: descriptor.kind,
                paint: descriptor.paint.clone(),
                visibility: initial,
            })?;
            visibility.note_registered(&descriptor.id, initial);
            if let Some(progress) = self.progress.as_mut() {
                progress.surface_layers.push(descriptor.id.clone());
            }
        }

        debug!(
            layer = %layer,
            features = collection.len(),
            visible = initial.is_visible(),
            "Layer registered"
        );
        Ok(())
    }

    /// Close the pass for `surface` and return its report.
    pub fn finish(&mut self, surface: SurfaceId) -> Option<CompositionReport> {
        if self.composing() != Some(surface) {
            return None;
        }
        let report = self.progress.take()?;
        info!(
            surface = %surface,
            registered = report.registered.len(),
            skipped = report.skipped.len(),
            "Composition finished"
        );
        Some(report)
    }

    /// Abandon the pass in progress.
    pub fn reset(&mut self) {
        self.progress = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{FetchError, ScriptedFetcher};
    use crate::surface::fake::{RecordingEngine, RecordingSurface, SurfaceCall};
    use crate::surface::{EventSink, LngLat, RenderEngine, SurfaceConfig};
    use crate::style::{StyleKey, StyleRegistry};
    use crate::visibility::VisibilityState;

    const EMPTY: &str = r#"{"type": "FeatureCollection", "features": []}"#;

    fn composer(fetcher: ScriptedFetcher) -> (LayerComposer<ScriptedFetcher>, Arc<LayerCatalog>) {
        let catalog = Arc::new(LayerCatalog::default());
        let loader = Arc::new(DataLoader::new(fetcher, Arc::clone(&catalog)));
        (LayerComposer::new(Arc::clone(&catalog), loader), catalog)
    }

    fn surface(engine: &mut RecordingEngine) -> RecordingSurface {
        let (tx, _rx) = mpsc::unbounded_channel();
        let config = SurfaceConfig {
            style: StyleRegistry::default().resolve(StyleKey::Dark).unwrap().clone(),
            center: LngLat::new(0.0, 0.0),
            zoom: 1.0,
            controls: Vec::new(),
        };
        engine.create(&config, EventSink::new(SurfaceId(1), tx)).unwrap()
    }

    async fn collect(rx: &mut mpsc::UnboundedReceiver<MapEvent>) -> Vec<MapEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            let done = matches!(event, MapEvent::CompositionFinished { .. });
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    #[tokio::test]
    async fn test_loads_reported_in_catalog_order() {
        let fetcher = ScriptedFetcher::new()
            .respond("departements.geojson", 60, EMPTY)
            .respond("communes.geojson", 30, EMPTY)
            .respond("sections.geojson", 0, EMPTY);
        let (mut composer, _) = composer(fetcher);
        let (tx, mut rx) = mpsc::unbounded_channel();

        composer.begin(SurfaceId(1), CancellationToken::new(), tx);
        let events = collect(&mut rx).await;

        let layers: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                MapEvent::LayerLoaded { layer, .. } => Some(*layer),
                _ => None,
            })
            .collect();
        assert_eq!(layers, LogicalLayer::ALL.to_vec());
        assert!(matches!(
            events.last(),
            Some(MapEvent::CompositionFinished { surface }) if *surface == SurfaceId(1)
        ));
    }

    #[tokio::test]
    async fn test_fetches_are_issued_concurrently() {
        let fetcher = ScriptedFetcher::new()
            .respond("departements.geojson", 200, EMPTY)
            .respond("communes.geojson", 0, EMPTY)
            .respond("sections.geojson", 0, EMPTY);
        let (mut composer, _) = composer(fetcher.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        composer.begin(SurfaceId(1), CancellationToken::new(), tx);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        assert_eq!(fetcher.calls().len(), 3);
        assert!(rx.try_recv().is_err());
        collect(&mut rx).await;
    }

    #[tokio::test]
    async fn test_cancel_stops_reporting() {
        let fetcher = ScriptedFetcher::new()
            .respond("departements.geojson", 100, EMPTY)
            .respond("communes.geojson", 100, EMPTY)
            .respond("sections.geojson", 100, EMPTY);
        let (mut composer, _) = composer(fetcher);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        composer.begin(SurfaceId(1), cancel.clone(), tx);
        cancel.cancel();

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_register_adds_source_before_layers() {
        let (mut composer, catalog) = composer(ScriptedFetcher::new());
        let mut engine = RecordingEngine::new();
        let mut surface = surface(&mut engine);
        let mut visibility = VisibilityController::new(catalog, VisibilityState::default());
        composer.progress = Some(CompositionReport::new(SurfaceId(1)));

        composer
            .register(
                &mut surface,
                LogicalLayer::Departments,
                Ok(GeometryCollection::new(vec![])),
                &mut visibility,
            )
            .unwrap();

        let calls: Vec<_> = engine
            .journal()
            .into_iter()
            .filter(|c| !matches!(c, SurfaceCall::Create(..)))
            .collect();
        assert_eq!(
            calls,
            vec![
                SurfaceCall::AddSource(SurfaceId(1), "departments".to_string()),
                SurfaceCall::AddLayer(SurfaceId(1), "departments-fill".to_string(), Visibility::Visible),
                SurfaceCall::AddLayer(SurfaceId(1), "departments-outline".to_string(), Visibility::Visible),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_uses_stored_visibility() {
        let (mut composer, catalog) = composer(ScriptedFetcher::new());
        let mut engine = RecordingEngine::new();
        let mut surface = surface(&mut engine);
        let mut visibility = VisibilityController::new(catalog, VisibilityState::default());

        composer
            .register(
                &mut surface,
                LogicalLayer::Communes,
                Ok(GeometryCollection::new(vec![])),
                &mut visibility,
            )
            .unwrap();

        assert!(engine.journal().contains(&SurfaceCall::AddLayer(
            SurfaceId(1),
            "communes-outline".to_string(),
            Visibility::Hidden
        )));
    }

    #[tokio::test]
    async fn test_failed_load_is_skipped_and_reported() {
        let (mut composer, catalog) = composer(ScriptedFetcher::new());
        let mut engine = RecordingEngine::new();
        let mut surface = surface(&mut engine);
        let mut visibility = VisibilityController::new(catalog, VisibilityState::default());
        composer.progress = Some(CompositionReport::new(SurfaceId(1)));

        let err = composer
            .register(
                &mut surface,
                LogicalLayer::Communes,
                Err(LoadError::FetchFailed {
                    layer: LogicalLayer::Communes,
                    location: "communes.geojson".to_string(),
                    reason: FetchError::Http("timeout".to_string()).to_string(),
                }),
                &mut visibility,
            )
            .unwrap_err();
        composer
            .register(
                &mut surface,
                LogicalLayer::Sections,
                Ok(GeometryCollection::new(vec![])),
                &mut visibility,
            )
            .unwrap();

        assert!(matches!(err, MapError::Load(_)));
        let report = composer.finish(SurfaceId(1)).unwrap();
        assert_eq!(report.registered, vec![LogicalLayer::Sections]);
        assert_eq!(report.surface_layers, vec!["sections-fill", "sections-outline"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].layer, LogicalLayer::Communes);
        assert!(report.skipped[0].reason.contains("timeout"));
        assert!(!report.is_complete());
    }

    #[test]
    fn test_finish_ignores_other_surface() {
        let (mut composer, _) = composer(ScriptedFetcher::new());
        composer.progress = Some(CompositionReport::new(SurfaceId(2)));

        assert!(composer.finish(SurfaceId(1)).is_none());
        assert_eq!(composer.composing(), Some(SurfaceId(2)));

        composer.reset();
        assert!(composer.finish(SurfaceId(2)).is_none());
    }
}
