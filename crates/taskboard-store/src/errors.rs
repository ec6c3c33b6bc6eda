//! Store error types.

use thiserror::Error;

/// Errors from the storage layer.
///
/// [`StoreError::Parse`] never reaches callers of [`crate::BoardStore`]:
/// malformed values are logged and read as empty.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for writing.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored value is not valid JSON for its key.
    #[error("malformed value under key {key}: {source}")]
    Parse {
        /// Storage key.
        key: String,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// Key cannot be mapped to a storage location.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}
