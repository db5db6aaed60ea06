//! Logging abstraction layer.
//!
//! Components that hand diagnostics to an outside collaborator (for example
//! the data-load failure reporter) depend on the [`Logger`] trait instead of
//! a concrete backend:
//!
//! - `Logger` trait: the interface components log through
//! - `TracingLogger`: production adapter that delegates to `tracing`
//! - `NoOpLogger`: silent logger for tests
//!
//! ```
//! use cartolayer::log::{Logger, NoOpLogger};
//! use cartolayer::{log_debug, log_warn};
//! use std::sync::Arc;
//!
//! struct LayerAudit {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! impl LayerAudit {
//!     fn record(&self, layer: &str, features: usize) {
//!         if features == 0 {
//!             log_warn!(self.logger, "layer {} has no features", layer);
//!         }
//!         log_debug!(self.logger, "layer {} audited", layer);
//!     }
//! }
//!
//! let audit = LayerAudit { logger: Arc::new(NoOpLogger) };
//! audit.record("communes", 0);
//! ```

mod noop;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
