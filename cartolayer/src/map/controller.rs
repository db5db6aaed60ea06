//! The map event loop.

use super::error::{ErrorReporter, LogReporter, MapError};
use super::event::MapEvent;
use super::handle::MapHandle;
use crate::catalog::{LayerCatalog, LogicalLayer};
use crate::compose::{CompositionReport, LayerComposer};
use crate::hover::{HoverFeature, HoverResolver};
use crate::loader::{DataLoader, GeometryFetcher};
use crate::log::TracingLogger;
use crate::style::{StyleKey, StyleRegistry};
use crate::surface::{
    Control, LngLat, ReadySignal, RenderEngine, SurfaceConfig, SurfaceId, SurfaceLifecycle,
};
use crate::visibility::{VisibilityController, VisibilityState};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, trace};

/// Default map centre (metropolitan France).
pub const DEFAULT_CENTER: LngLat = LngLat {
    lng: 2.5,
    lat: 46.5,
};

/// Default zoom level.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Everything needed to build a [`MapController`].
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Basemap shown first
    pub style: StyleKey,
    pub center: LngLat,
    pub zoom: f64,
    /// Add zoom and rotation buttons
    pub navigation_control: bool,
    /// Initial toggle state
    pub visibility: VisibilityState,
    pub styles: StyleRegistry,
    pub catalog: LayerCatalog,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            style: StyleKey::Terrain,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            navigation_control: true,
            visibility: VisibilityState::default(),
            styles: StyleRegistry::default(),
            catalog: LayerCatalog::default(),
        }
    }
}

/// Single owner of the surface and every component acting on it.
///
/// All work happens in [`dispatch`](Self::dispatch), one event at a time.
/// Engine callbacks, composition results and user intents all arrive on the
/// same channel, so nothing here runs concurrently with itself; only the
/// geometry fetches run in the background.
pub struct MapController<E: RenderEngine, F> {
    styles: StyleRegistry,
    catalog: Arc<LayerCatalog>,
    center: LngLat,
    zoom: f64,
    navigation_control: bool,
    initial_style: StyleKey,
    lifecycle: SurfaceLifecycle<E>,
    composer: LayerComposer<F>,
    visibility: VisibilityController,
    hover: HoverResolver,
    reporter: Arc<dyn ErrorReporter>,
    composition: Option<CompositionReport>,
    tx: mpsc::UnboundedSender<MapEvent>,
    rx: mpsc::UnboundedReceiver<MapEvent>,
}

impl<E: RenderEngine, F: GeometryFetcher + 'static> MapController<E, F> {
    /// Build a controller. No surface exists until [`start`](Self::start).
    pub fn new(engine: E, fetcher: F, options: MapOptions) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let catalog = Arc::new(options.catalog);
        let loader = Arc::new(DataLoader::new(fetcher, Arc::clone(&catalog)));

        Self {
            styles: options.styles,
            center: options.center,
            zoom: options.zoom,
            navigation_control: options.navigation_control,
            initial_style: options.style,
            lifecycle: SurfaceLifecycle::new(engine, tx.clone()),
            composer: LayerComposer::new(Arc::clone(&catalog), loader),
            visibility: VisibilityController::new(Arc::clone(&catalog), options.visibility),
            hover: HoverResolver::new(&catalog),
            reporter: Arc::new(LogReporter::new(Arc::new(TracingLogger::new()))),
            composition: None,
            catalog,
            tx,
            rx,
        }
    }

    /// Replace the collaborator told about layer load failures.
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Intent handle for toggles and style switches.
    pub fn handle(&self) -> MapHandle {
        MapHandle::new(self.tx.clone())
    }

    /// Create the first surface with the configured style.
    pub fn start(&mut self) -> Result<SurfaceId, MapError> {
        self.reinit(self.initial_style)
    }

    /// Switch the basemap.
    ///
    /// Returns `false` when `style` is already active and the surface was
    /// kept. An unknown style fails before the current surface is touched.
    pub fn set_base(&mut self, style: StyleKey) -> Result<bool, MapError> {
        if self.lifecycle.current_id().is_some() && self.lifecycle.style() == Some(style) {
            debug!(style = %style, "Style already active");
            return Ok(false);
        }
        self.reinit(style)?;
        Ok(true)
    }

    /// Flip a layer; pushed at once if the surface is ready.
    pub fn toggle(&mut self, name: LogicalLayer) -> bool {
        self.visibility
            .toggle(name, self.lifecycle.active_surface_mut())
    }

    fn reinit(&mut self, style: StyleKey) -> Result<SurfaceId, MapError> {
        let descriptor = self.styles.resolve(style)?.clone();
        let config = SurfaceConfig {
            style: descriptor,
            center: self.center,
            zoom: self.zoom,
            controls: if self.navigation_control {
                vec![Control::Navigation]
            } else {
                Vec::new()
            },
        };

        self.composer.reset();
        self.visibility.forget_surface();
        self.hover.detach();
        self.composition = None;

        Ok(self.lifecycle.reinit(style, &config)?)
    }

    /// Destroy the surface and stop reacting to its events.
    pub fn shutdown(&mut self) {
        self.composer.reset();
        self.hover.detach();
        self.lifecycle.teardown();
        info!("Map shut down");
    }

    /// Handle one event. Returns `false` once the loop should stop.
    ///
    /// Failures never escape: stale callbacks are dropped, load failures go
    /// to the error reporter and anything else is logged.
    pub fn dispatch(&mut self, event: MapEvent) -> bool {
        if matches!(event, MapEvent::Shutdown) {
            self.shutdown();
            return false;
        }

        match self.handle_event(event) {
            Ok(()) => {}
            Err(MapError::StaleCallback(surface)) => {
                trace!(surface = %surface, "Stale callback dropped");
            }
            Err(MapError::Load(e)) => {
                self.reporter.report(&e);
                debug!(layer = %e.layer(), error = %e, "Layer skipped");
            }
            Err(e) => {
                error!(error = %e, "Map event failed");
            }
        }
        true
    }

    fn handle_event(&mut self, event: MapEvent) -> Result<(), MapError> {
        match event {
            MapEvent::Ready { surface } => {
                let composer = &mut self.composer;
                let tx = self.tx.clone();
                let signal = self.lifecycle.on_ready(surface, |id, cancel, _| {
                    composer.begin(id, cancel, tx);
                });
                match signal {
                    ReadySignal::Fired => Ok(()),
                    ReadySignal::AlreadyReady => {
                        trace!(surface = %surface, "Duplicate ready signal");
                        Ok(())
                    }
                    ReadySignal::Stale => Err(MapError::StaleCallback(surface)),
                }
            }

            MapEvent::LayerLoaded {
                surface,
                layer,
                result,
            } => {
                if self.composer.composing() != Some(surface) {
                    return Err(MapError::StaleCallback(surface));
                }
                let target = self
                    .lifecycle
                    .ready_surface_mut(surface)
                    .ok_or(MapError::StaleCallback(surface))?;
                self.composer
                    .register(target, layer, result, &mut self.visibility)
            }

            MapEvent::CompositionFinished { surface } => {
                let target = self
                    .lifecycle
                    .ready_surface_mut(surface)
                    .ok_or(MapError::StaleCallback(surface))?;
                let report = self
                    .composer
                    .finish(surface)
                    .ok_or(MapError::StaleCallback(surface))?;

                self.visibility.apply(target);
                self.hover.attach(target);
                for kind in HoverResolver::EVENTS {
                    self.lifecycle.listen(surface, kind);
                }
                info!(report = %report, "Map composed");
                self.composition = Some(report);
                Ok(())
            }

            MapEvent::PointerMove {
                surface,
                point,
                position,
            } => {
                let target = self
                    .lifecycle
                    .ready_surface_mut(surface)
                    .ok_or(MapError::StaleCallback(surface))?;
                self.hover.on_pointer_move(target, point, position);
                Ok(())
            }

            MapEvent::PointerLeave { surface } => {
                let target = self
                    .lifecycle
                    .ready_surface_mut(surface)
                    .ok_or(MapError::StaleCallback(surface))?;
                self.hover.on_pointer_leave(target);
                Ok(())
            }

            MapEvent::Toggle(name) => {
                self.toggle(name);
                Ok(())
            }

            MapEvent::SetBase(style) => self.set_base(style).map(|_| ()),

            MapEvent::Shutdown => Ok(()),
        }
    }

    /// Wait for the next event and handle it.
    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => self.dispatch(event),
            None => false,
        }
    }

    /// Handle every event already queued without waiting.
    ///
    /// Returns the number of events handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            handled += 1;
            if !self.dispatch(event) {
                break;
            }
        }
        handled
    }

    /// Run until [`MapHandle::shutdown`] is called.
    pub async fn run(&mut self) {
        while self.process_next().await {}
    }

    /// Run until the live surface is composed.
    ///
    /// Returns `None` if the loop stopped or no surface exists.
    pub async fn run_until_composed(&mut self) -> Option<&CompositionReport> {
        while self.composition.is_none() {
            self.lifecycle.current_id()?;
            if !self.process_next().await {
                return None;
            }
        }
        self.composition.as_ref()
    }

    /// Whether the live surface finished composing.
    pub fn is_composed(&self) -> bool {
        self.composition.is_some()
    }

    /// Report of the last completed composition of the live surface.
    pub fn composition(&self) -> Option<&CompositionReport> {
        self.composition.as_ref()
    }

    pub fn visibility(&self) -> &VisibilityState {
        self.visibility.state()
    }

    /// Feature currently under the pointer.
    pub fn hovered(&self) -> Option<&HoverFeature> {
        self.hover.current()
    }

    pub fn lifecycle(&self) -> &SurfaceLifecycle<E> {
        &self.lifecycle
    }

    pub fn engine(&self) -> &E {
        self.lifecycle.engine()
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }
}
