//! Error types for the offload bridge.

use thiserror::Error;

/// Failures of the worker context itself.
///
/// These never describe the offloaded call's own outcome; whatever the call
/// returns is handed back unchanged.
#[derive(Debug, Error)]
pub enum OffloadError {
    /// No tokio runtime was reachable when the call was submitted.
    #[error("no tokio runtime available to run blocking work")]
    NoRuntime,

    /// The executor could not start a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The worker dropped the call without producing a result.
    ///
    /// Happens when the executor shuts down with the call still queued.
    #[error("worker dropped the call before producing a result")]
    WorkerLost,
}
