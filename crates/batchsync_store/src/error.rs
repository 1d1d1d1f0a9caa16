//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur against the backing store.
///
/// `Unavailable` is the only temporary failure: callers must let it
/// propagate so the transport surfaces a retryable server error.
/// Everything else reflects a state the caller asked about.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A create hit an existing document with the same id.
    #[error("document already exists: {id}")]
    AlreadyExists {
        /// The conflicting document id.
        id: String,
    },

    /// The backing store could not be reached. Temporary; retryable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored payload could not be decoded.
    #[error("corrupt document {id}: {reason}")]
    Corrupt {
        /// The document id.
        id: String,
        /// What failed to decode.
        reason: String,
    },
}

impl StoreError {
    /// Returns true if retrying the whole request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
