//! No-operation logger implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// A logger that discards all messages.
///
/// Used by unit tests and by embedders that do not want the engine's
/// diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoOpLogger>();
    }

    #[test]
    fn test_noop_logger_accepts_every_level() {
        let logger: Box<dyn Logger> = Box::new(NoOpLogger);
        logger.trace(format_args!("surface {} created", 1));
        logger.debug(format_args!("source registered"));
        logger.info(format_args!("composition finished"));
        logger.warn(format_args!("layer skipped"));
        logger.error(format_args!("fetch failed"));
    }

    #[test]
    fn test_noop_logger_debug_impl() {
        assert_eq!(format!("{:?}", NoOpLogger), "NoOpLogger");
    }
}
