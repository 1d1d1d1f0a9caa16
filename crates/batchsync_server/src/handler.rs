//! Request-level orchestration.
//!
//! The handler validates the decoded request, resolves the account,
//! drives the [`BatchProcessor`], and shapes the response. Transport
//! concerns (HTTP routing, body decoding) live one layer up in the
//! server facade.

use crate::auth::AccountProvider;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::processor::BatchProcessor;
use batchsync_protocol::{
    BatchRequest, ClientViewRequest, ClientViewResponse, MutationInfo, MutationOutcome, Todo,
    TODO_ID_PREFIX,
};
use batchsync_store::{ClientStateStore, DocumentStore, StoreError};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Handles decoded push and client-view requests.
pub struct RequestHandler {
    config: ServerConfig,
    auth: Arc<dyn AccountProvider>,
    state: Arc<dyn ClientStateStore>,
    docs: Arc<dyn DocumentStore>,
    processor: BatchProcessor,
}

impl RequestHandler {
    /// Creates a handler over the given stores.
    pub fn new(
        config: ServerConfig,
        auth: Arc<dyn AccountProvider>,
        state: Arc<dyn ClientStateStore>,
        docs: Arc<dyn DocumentStore>,
        processor: BatchProcessor,
    ) -> Self {
        Self {
            config,
            auth,
            state,
            docs,
            processor,
        }
    }

    fn validate_client_id(client_id: &str) -> ServerResult<()> {
        if client_id.is_empty() {
            return Err(ServerError::InvalidRequest(
                "clientID field is required".into(),
            ));
        }
        Ok(())
    }

    /// Handles a push: applies the batch and reports per-mutation
    /// notes for everything that was not applied cleanly.
    pub fn handle_push(
        &self,
        auth_token: Option<&str>,
        request: &BatchRequest,
    ) -> ServerResult<Vec<MutationInfo>> {
        Self::validate_client_id(&request.client_id)?;
        if request.mutations.len() > self.config.max_push_batch as usize {
            return Err(ServerError::InvalidRequest(format!(
                "batch of {} mutations exceeds limit of {}",
                request.mutations.len(),
                self.config.max_push_batch
            )));
        }

        let account = self.auth.resolve(auth_token)?;
        let outcomes =
            self.processor
                .process(&account, &request.client_id, &request.mutations)?;

        info!(
            client_id = %request.client_id,
            mutations = request.mutations.len(),
            applied = outcomes.iter().filter(|o| o.is_applied()).count(),
            "push processed"
        );

        Ok(outcomes
            .into_iter()
            .filter_map(MutationOutcome::into_info)
            .collect())
    }

    /// Handles a client-view read: the client's cursor plus the
    /// account's full todo view, read in cursor-then-view order so the
    /// reported cursor is never ahead of the view.
    pub fn handle_client_view(
        &self,
        auth_token: Option<&str>,
        request: &ClientViewRequest,
    ) -> ServerResult<ClientViewResponse> {
        Self::validate_client_id(&request.client_id)?;

        let account = self.auth.resolve(auth_token)?;
        let last_mutation_id = self.state.last_mutation_id(&account, &request.client_id)?;

        let mut client_view = BTreeMap::new();
        for doc in self.docs.query_prefix(&account, TODO_ID_PREFIX)? {
            let todo: Todo = serde_json::from_value(doc.body).map_err(|e| {
                ServerError::Store(StoreError::Corrupt {
                    id: doc.id,
                    reason: e.to_string(),
                })
            })?;
            client_view.insert(todo.id.clone(), todo);
        }

        Ok(ClientViewResponse {
            last_mutation_id,
            client_view,
        })
    }
}
