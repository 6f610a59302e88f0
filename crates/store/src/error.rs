use codec::CodecError;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the storage engine.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The user key is absent from the index.
    #[error("key not found: {key}")]
    NotFound {
        /// The key that was looked up.
        key: String,
    },

    /// A file failed to decode, or an in-memory structure disagreed with
    /// disk (e.g. the index points at a timestamped key that is in
    /// neither the memtable nor its data file).
    #[error("corrupted data: {detail}")]
    Corrupted {
        /// Description of the inconsistency.
        detail: String,
    },

    /// An underlying filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn not_found(key: &str) -> Self {
        StoreError::NotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn corrupted(detail: impl Into<String>) -> Self {
        StoreError::Corrupted {
            detail: detail.into(),
        }
    }
}

impl From<CodecError> for StoreError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Io(io_err) => StoreError::Io(io_err),
            CodecError::Corrupt { record } => StoreError::Corrupted {
                detail: format!("undecodable record: {record:?}"),
            },
        }
    }
}
