//! User intent handle.

use super::event::MapEvent;
use crate::catalog::LogicalLayer;
use crate::style::StyleKey;
use tokio::sync::mpsc;

/// Cloneable handle for the presentation layer.
///
/// Every method is a fire-and-forget signal; effects are observed on the
/// surface. Signals sent after the controller is gone are dropped.
#[derive(Debug, Clone)]
pub struct MapHandle {
    tx: mpsc::UnboundedSender<MapEvent>,
}

impl MapHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<MapEvent>) -> Self {
        Self { tx }
    }

    /// Flip the visibility of a logical layer.
    pub fn toggle(&self, layer: LogicalLayer) {
        let _ = self.tx.send(MapEvent::Toggle(layer));
    }

    /// Switch the basemap.
    pub fn set_base(&self, style: StyleKey) {
        let _ = self.tx.send(MapEvent::SetBase(style));
    }

    /// Stop the controller's event loop.
    pub fn shutdown(&self) {
        let _ = self.tx.send(MapEvent::Shutdown);
    }
}
