//! Controller errors and failure reporting.

use crate::catalog::CatalogError;
use crate::log::Logger;
use crate::loader::LoadError;
use crate::style::StyleError;
use crate::surface::{SurfaceError, SurfaceId};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while driving the map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Per-layer load failure; the layer is left out
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// A callback arrived for a surface that no longer exists
    #[error("Stale callback for {0}")]
    StaleCallback(SurfaceId),
}

impl MapError {
    /// Whether the error only means an event outlived its surface.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleCallback(_))
    }
}

/// External collaborator told about layers that failed to load.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &LoadError);
}

/// Reports load failures through a [`Logger`].
pub struct LogReporter {
    logger: Arc<dyn Logger>,
}

impl LogReporter {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl ErrorReporter for LogReporter {
    fn report(&self, error: &LoadError) {
        crate::log_warn!(self.logger, "Layer '{}' left out: {}", error.layer(), error);
    }
}
