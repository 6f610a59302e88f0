use store::StoreError;
use thiserror::Error;

/// Errors surfaced by the database handle.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying storage engine.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The background task is already running.
    #[error("already running")]
    AlreadyRunning,

    /// The background task is not running.
    #[error("not running")]
    NotRunning,

    /// An underlying I/O error (e.g. spawning the worker thread failed).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
