//! Surface creation and teardown.

use super::engine::{EventSink, RenderEngine, Surface};
use super::types::{EventKind, ListenerId, SurfaceConfig, SurfaceError, SurfaceId};
use crate::map::MapEvent;
use crate::style::StyleKey;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Lifecycle state of the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No surface was ever requested
    Uninitialized,
    /// A surface exists and is waiting for the engine's ready signal
    Creating,
    /// The surface is ready for sources, layers and listeners
    Ready,
    /// The last surface was torn down
    Destroyed,
}

/// Outcome of delivering a ready signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadySignal {
    /// `Creating -> Ready`; the callback ran
    Fired,
    /// The surface is already ready; the callback did not run
    AlreadyReady,
    /// The signal belongs to a destroyed surface
    Stale,
}

struct LiveSurface<S> {
    id: SurfaceId,
    style: StyleKey,
    surface: S,
    listeners: Vec<ListenerId>,
    cancel: CancellationToken,
}

/// Owner of the single live render surface.
///
/// At most one surface exists at a time: [`reinit`](Self::reinit) tears the
/// previous one down (listeners unregistered, in-flight work cancelled)
/// before asking the engine for a new one.
pub struct SurfaceLifecycle<E: RenderEngine> {
    engine: E,
    events: mpsc::UnboundedSender<MapEvent>,
    state: LifecycleState,
    live: Option<LiveSurface<E::Surface>>,
    next_id: u64,
}

impl<E: RenderEngine> SurfaceLifecycle<E> {
    /// Create a lifecycle; engine events are delivered to `events`.
    pub fn new(engine: E, events: mpsc::UnboundedSender<MapEvent>) -> Self {
        Self {
            engine,
            events,
            state: LifecycleState::Uninitialized,
            live: None,
            next_id: 1,
        }
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The rendering engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Id of the live surface, ready or not.
    pub fn current_id(&self) -> Option<SurfaceId> {
        self.live.as_ref().map(|live| live.id)
    }

    /// Style of the live surface.
    pub fn style(&self) -> Option<StyleKey> {
        self.live.as_ref().map(|live| live.style)
    }

    /// Whether the live surface reported ready.
    pub fn is_ready(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    /// Number of listeners registered on the live surface.
    pub fn listener_count(&self) -> usize {
        self.live.as_ref().map_or(0, |live| live.listeners.len())
    }

    /// Destroy the current surface (if any) and create one for `style`.
    pub fn reinit(
        &mut self,
        style: StyleKey,
        config: &SurfaceConfig,
    ) -> Result<SurfaceId, SurfaceError> {
        self.teardown();

        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.state = LifecycleState::Creating;

        let sink = EventSink::new(id, self.events.clone());
        let mut surface = match self.engine.create(config, sink) {
            Ok(surface) => surface,
            Err(e) => {
                self.state = LifecycleState::Destroyed;
                return Err(e);
            }
        };

        for control in &config.controls {
            surface.add_control(*control);
        }

        info!(surface = %id, style = %style, url = %config.style.url, "Surface creating");
        self.live = Some(LiveSurface {
            id,
            style,
            surface,
            listeners: Vec::new(),
            cancel: CancellationToken::new(),
        });
        Ok(id)
    }

    /// Destroy the current surface.
    ///
    /// Synchronous: once this returns, every listener is unregistered and
    /// work tied to the surface has been told to stop.
    pub fn teardown(&mut self) {
        let Some(mut live) = self.live.take() else {
            return;
        };

        live.cancel.cancel();
        for listener in live.listeners.drain(..) {
            live.surface.off(listener);
        }
        live.surface.remove();
        self.state = LifecycleState::Destroyed;
        debug!(surface = %live.id, "Surface destroyed");
    }

    /// Deliver the engine's ready signal for surface `id`.
    ///
    /// The callback runs at most once per `Creating` phase, receiving the
    /// surface's cancellation token and the surface itself.
    pub fn on_ready<C>(&mut self, id: SurfaceId, callback: C) -> ReadySignal
    where
        C: FnOnce(SurfaceId, CancellationToken, &mut E::Surface),
    {
        let Some(live) = self.live.as_mut().filter(|live| live.id == id) else {
            return ReadySignal::Stale;
        };

        if self.state != LifecycleState::Creating {
            return ReadySignal::AlreadyReady;
        }

        self.state = LifecycleState::Ready;
        info!(surface = %id, "Surface ready");
        callback(id, live.cancel.clone(), &mut live.surface);
        ReadySignal::Fired
    }

    /// The live surface, if it is `id` and ready.
    pub fn ready_surface_mut(&mut self, id: SurfaceId) -> Option<&mut E::Surface> {
        if self.state != LifecycleState::Ready {
            return None;
        }
        self.live
            .as_mut()
            .filter(|live| live.id == id)
            .map(|live| &mut live.surface)
    }

    /// The live surface, if it is ready.
    pub fn active_surface_mut(&mut self) -> Option<&mut E::Surface> {
        match self.current_id() {
            Some(id) => self.ready_surface_mut(id),
            None => None,
        }
    }

    /// Register a listener on surface `id`; it is unregistered on teardown.
    pub fn listen(&mut self, id: SurfaceId, kind: EventKind) -> Option<ListenerId> {
        let live = self.live.as_mut().filter(|live| live.id == id)?;
        let listener = live.surface.on(kind);
        live.listeners.push(listener);
        Some(listener)
    }
}

impl<E: RenderEngine> Drop for SurfaceLifecycle<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::fake::{RecordingEngine, SurfaceCall};
    use crate::surface::{Control, LngLat};
    use crate::style::StyleRegistry;

    fn config(style: StyleKey) -> SurfaceConfig {
        SurfaceConfig {
            style: StyleRegistry::default().resolve(style).unwrap().clone(),
            center: LngLat::new(2.5, 46.5),
            zoom: 5.0,
            controls: vec![Control::Navigation],
        }
    }

    fn lifecycle() -> (
        SurfaceLifecycle<RecordingEngine>,
        RecordingEngine,
        mpsc::UnboundedReceiver<MapEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = RecordingEngine::new();
        (SurfaceLifecycle::new(engine.clone(), tx), engine, rx)
    }

    #[test]
    fn test_reinit_moves_to_creating() {
        let (mut lifecycle, engine, _rx) = lifecycle();
        assert_eq!(lifecycle.state(), LifecycleState::Uninitialized);

        let id = lifecycle.reinit(StyleKey::Terrain, &config(StyleKey::Terrain)).unwrap();

        assert_eq!(lifecycle.state(), LifecycleState::Creating);
        assert_eq!(lifecycle.current_id(), Some(id));
        assert_eq!(lifecycle.style(), Some(StyleKey::Terrain));
        assert!(engine.journal().contains(&SurfaceCall::AddControl(id, Control::Navigation)));
    }

    #[test]
    fn test_on_ready_fires_once() {
        let (mut lifecycle, _engine, _rx) = lifecycle();
        let id = lifecycle.reinit(StyleKey::Dark, &config(StyleKey::Dark)).unwrap();

        let mut fired = 0;
        assert_eq!(lifecycle.on_ready(id, |_, _, _| fired += 1), ReadySignal::Fired);
        assert_eq!(
            lifecycle.on_ready(id, |_, _, _| fired += 1),
            ReadySignal::AlreadyReady
        );

        assert_eq!(fired, 1);
        assert!(lifecycle.is_ready());
    }

    #[test]
    fn test_ready_for_replaced_surface_is_stale() {
        let (mut lifecycle, _engine, _rx) = lifecycle();
        let first = lifecycle.reinit(StyleKey::Terrain, &config(StyleKey::Terrain)).unwrap();
        let second = lifecycle.reinit(StyleKey::Dark, &config(StyleKey::Dark)).unwrap();

        assert_ne!(first, second);
        assert_eq!(lifecycle.on_ready(first, |_, _, _| {}), ReadySignal::Stale);
        assert_eq!(lifecycle.state(), LifecycleState::Creating);
        assert!(lifecycle.ready_surface_mut(first).is_none());
    }

    #[test]
    fn test_reinit_tears_down_before_creating() {
        let (mut lifecycle, engine, _rx) = lifecycle();
        let first = lifecycle.reinit(StyleKey::Terrain, &config(StyleKey::Terrain)).unwrap();
        lifecycle.on_ready(first, |_, _, _| {});
        let listener = lifecycle.listen(first, EventKind::PointerMove).unwrap();

        let second = lifecycle.reinit(StyleKey::Dark, &config(StyleKey::Dark)).unwrap();

        let journal = engine.journal();
        let off = journal
            .iter()
            .position(|c| *c == SurfaceCall::Off(first, listener))
            .unwrap();
        let removed = journal
            .iter()
            .position(|c| *c == SurfaceCall::Remove(first))
            .unwrap();
        let created = journal
            .iter()
            .position(|c| *c == SurfaceCall::Create(second, StyleKey::Dark))
            .unwrap();
        assert!(off < removed && removed < created);
        assert_eq!(engine.alive(), 1);
        assert_eq!(lifecycle.listener_count(), 0);
    }

    #[test]
    fn test_teardown_cancels_surface_work() {
        let (mut lifecycle, _engine, _rx) = lifecycle();
        let id = lifecycle.reinit(StyleKey::Terrain, &config(StyleKey::Terrain)).unwrap();

        let mut token = None;
        lifecycle.on_ready(id, |_, cancel, _| token = Some(cancel));
        let token = token.unwrap();
        assert!(!token.is_cancelled());

        lifecycle.teardown();

        assert!(token.is_cancelled());
        assert_eq!(lifecycle.state(), LifecycleState::Destroyed);
        assert_eq!(lifecycle.current_id(), None);
    }

    #[test]
    fn test_create_failure_leaves_destroyed() {
        let (mut lifecycle, engine, _rx) = lifecycle();
        engine.fail_next_create();

        let result = lifecycle.reinit(StyleKey::Terrain, &config(StyleKey::Terrain));

        assert!(matches!(result, Err(SurfaceError::CreateFailed(_))));
        assert_eq!(lifecycle.state(), LifecycleState::Destroyed);
        assert!(lifecycle.active_surface_mut().is_none());
    }

    #[test]
    fn test_drop_removes_surface() {
        let (mut lifecycle, engine, _rx) = lifecycle();
        lifecycle.reinit(StyleKey::Light, &config(StyleKey::Light)).unwrap();

        drop(lifecycle);

        assert_eq!(engine.alive(), 0);
    }
}
