//! Reporting channel for submission results
//!
//! The host decides where the one line per submission ends up: a build log,
//! a terminal, or `tracing`.

use tracing::{error, info};

/// Receives the single success or failure line of a submission
pub trait Reporter: Send + Sync {
    /// Informational message (annotation accepted)
    fn info(&self, message: &str);

    /// Error message (annotation rejected, build continues)
    fn error(&self, message: &str);
}

/// Reporter that emits `tracing` events
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }
}

/// Reporter that discards everything
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn info(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
