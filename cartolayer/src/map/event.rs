//! Events processed by the map controller.

use crate::catalog::LogicalLayer;
use crate::loader::{GeometryCollection, LoadError};
use crate::style::StyleKey;
use crate::surface::{LngLat, ScreenPoint, SurfaceId};

/// Everything the controller reacts to.
///
/// Engine and composition events carry the [`SurfaceId`] they belong to;
/// the controller drops them when that surface is gone.
#[derive(Debug)]
pub enum MapEvent {
    /// The engine finished loading the surface's style
    Ready { surface: SurfaceId },
    /// The pointer moved over the surface
    PointerMove {
        surface: SurfaceId,
        point: ScreenPoint,
        position: LngLat,
    },
    /// The pointer left the surface
    PointerLeave { surface: SurfaceId },
    /// Geometry for one logical layer arrived, in catalog order
    LayerLoaded {
        surface: SurfaceId,
        layer: LogicalLayer,
        result: Result<GeometryCollection, LoadError>,
    },
    /// Every logical layer of the pass was delivered
    CompositionFinished { surface: SurfaceId },
    /// User intent: flip a layer
    Toggle(LogicalLayer),
    /// User intent: switch the basemap
    SetBase(StyleKey),
    /// Stop the event loop
    Shutdown,
}

impl MapEvent {
    /// Surface the event is bound to; `None` for user intents.
    pub fn surface(&self) -> Option<SurfaceId> {
        match self {
            Self::Ready { surface }
            | Self::PointerMove { surface, .. }
            | Self::PointerLeave { surface }
            | Self::LayerLoaded { surface, .. }
            | Self::CompositionFinished { surface } => Some(*surface),
            Self::Toggle(_) | Self::SetBase(_) | Self::Shutdown => None,
        }
    }
}
