//! Error types for the batch server.

use batchsync_store::StoreError;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while serving a request.
///
/// The split between client and server errors is load-bearing: the
/// client's retry policy differs. Client errors must not be retried
/// as-is; server errors should be retried with backoff, and the
/// idempotency protocol makes the retry safe.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Invalid request format.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A mutation id jumped ahead of the cursor.
    #[error("Mutation ID {mutation_id} is too high - next expected mutation is {expected}")]
    SequenceGap {
        /// The offending mutation id.
        mutation_id: u64,
        /// The id the server expected next.
        expected: u64,
    },

    /// Another writer advanced the same client's cursor mid-batch.
    ///
    /// The losing batch surfaces this as a retryable failure; on
    /// retry the contested mutation id classifies as already
    /// processed.
    #[error("concurrent cursor update for client {client_id}")]
    CursorContention {
        /// The client whose cursor was contested.
        client_id: String,
    },

    /// Storage failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::InvalidRequest(_) | ServerError::SequenceGap { .. }
        )
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification() {
        assert!(ServerError::InvalidRequest("bad".into()).is_client_error());
        assert!(ServerError::SequenceGap {
            mutation_id: 3,
            expected: 2
        }
        .is_client_error());

        assert!(ServerError::CursorContention {
            client_id: "c1".into()
        }
        .is_server_error());
        assert!(ServerError::Store(StoreError::Unavailable("down".into())).is_server_error());
        assert!(ServerError::Internal("oops".into()).is_server_error());
    }

    #[test]
    fn gap_error_names_both_ids() {
        let err = ServerError::SequenceGap {
            mutation_id: 5,
            expected: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains('2'));
    }
}
