//! The transport-facing facade.
//!
//! [`BatchServer`] routes POST bodies to the request handler and maps
//! everything to JSON bytes. It is deliberately transport-agnostic: an
//! HTTP frontend forwards `(path, auth header, body)` here, and tests
//! drive it directly with no network in the loop.

use crate::auth::{AccountProvider, StaticAccountProvider};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::RequestHandler;
use crate::mutators::todo_mutators;
use crate::processor::BatchProcessor;
use batchsync_protocol::{BatchRequest, BatchResponse, ClientViewRequest};
use batchsync_store::{ClientStateStore, DocumentStore, MemoryStore};
use std::sync::Arc;

/// Path of the push endpoint.
pub const PUSH_PATH: &str = "/sync/push";
/// Path of the client-view endpoint.
pub const CLIENT_VIEW_PATH: &str = "/sync/client-view";

/// A complete sync endpoint over pluggable stores.
pub struct BatchServer {
    handler: RequestHandler,
}

impl BatchServer {
    /// Creates a server with the given configuration and stores.
    pub fn new(
        config: ServerConfig,
        auth: Arc<dyn AccountProvider>,
        state: Arc<dyn ClientStateStore>,
        docs: Arc<dyn DocumentStore>,
    ) -> Self {
        let processor = BatchProcessor::new(state.clone(), docs.clone(), Arc::new(todo_mutators()));
        Self {
            handler: RequestHandler::new(config, auth, state, docs, processor),
        }
    }

    /// Creates a server over a fresh in-memory store with defaults.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(
            ServerConfig::default(),
            Arc::new(StaticAccountProvider::default()),
            store.clone(),
            store,
        )
    }

    /// Handles one POST request.
    ///
    /// `body` is the JSON request body; the returned bytes are the
    /// JSON response body. Callers map [`ServerError::is_client_error`]
    /// to the HTTP status class.
    pub fn handle_post(
        &self,
        path: &str,
        auth_token: Option<&str>,
        body: &[u8],
    ) -> ServerResult<Vec<u8>> {
        match path {
            PUSH_PATH => {
                let request: BatchRequest = decode(body)?;
                let mutation_infos = self.handler.handle_push(auth_token, &request)?;
                encode(&BatchResponse { mutation_infos })
            }
            CLIENT_VIEW_PATH => {
                let request: ClientViewRequest = decode(body)?;
                let response = self.handler.handle_client_view(auth_token, &request)?;
                encode(&response)
            }
            other => Err(ServerError::InvalidRequest(format!(
                "unknown path: {other}"
            ))),
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> ServerResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| ServerError::InvalidRequest(format!("malformed request body: {e}")))
}

fn encode<T: serde::Serialize>(response: &T) -> ServerResult<Vec<u8>> {
    serde_json::to_vec(response).map_err(|e| ServerError::Internal(e.to_string()))
}
