//! The ordering and idempotency engine.
//!
//! Each client numbers its mutations 1, 2, 3, ... with no gaps. The
//! processor tracks the last applied id per (account, client) and, for
//! each incoming mutation, either applies it (id == cursor + 1), skips
//! it (id <= cursor, already processed), or rejects the whole request
//! (id ahead of cursor + 1). The cursor advances after every
//! application attempt that completes, including permanent failures,
//! so a mutation the server can never accept is consumed rather than
//! retried forever.

use crate::applier::{ApplyError, MutatorRegistry};
use crate::error::{ServerError, ServerResult};
use batchsync_protocol::{Mutation, MutationOutcome};
use batchsync_store::{AccountId, ClientStateStore, DocumentStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Processes ordered mutation batches for one server.
///
/// The processor owns no mutable state of its own; the per-client
/// cursor lives in the [`ClientStateStore`] and is the only shared
/// mutable state in the system. Mutations within a batch are handled
/// strictly sequentially because each depends on the cursor written by
/// the previous one.
pub struct BatchProcessor {
    state: Arc<dyn ClientStateStore>,
    docs: Arc<dyn DocumentStore>,
    mutators: Arc<MutatorRegistry>,
}

impl BatchProcessor {
    /// Creates a new processor over the given stores and registry.
    pub fn new(
        state: Arc<dyn ClientStateStore>,
        docs: Arc<dyn DocumentStore>,
        mutators: Arc<MutatorRegistry>,
    ) -> Self {
        Self {
            state,
            docs,
            mutators,
        }
    }

    /// Processes a batch of mutations for one client, in order.
    ///
    /// Returns one outcome per considered mutation. Error cases:
    ///
    /// - a zero mutation id rejects the request as malformed;
    /// - a sequence gap rejects the request with [`ServerError::SequenceGap`];
    /// - store failures propagate uncaught, leaving the cursor at its
    ///   last committed value (earlier mutations in the batch keep
    ///   their committed advances; there is no batch transaction).
    pub fn process(
        &self,
        account: &AccountId,
        client_id: &str,
        mutations: &[Mutation],
    ) -> ServerResult<Vec<MutationOutcome>> {
        let mut outcomes = Vec::with_capacity(mutations.len());

        for mutation in mutations {
            if mutation.id == 0 {
                return Err(ServerError::InvalidRequest(
                    "id field of mutation must be non-zero".into(),
                ));
            }

            // Re-read per mutation: the cursor must reflect the
            // mutation just applied, and another process may have
            // advanced it underneath us.
            let cursor = self.state.last_mutation_id(account, client_id)?;
            let expected = cursor + 1;

            if mutation.id > expected {
                warn!(
                    client_id,
                    mutation_id = mutation.id,
                    expected,
                    "sequence gap, rejecting batch"
                );
                return Err(ServerError::SequenceGap {
                    mutation_id: mutation.id,
                    expected,
                });
            }

            if mutation.id < expected {
                debug!(client_id, mutation_id = mutation.id, "duplicate, skipping");
                outcomes.push(MutationOutcome::Skipped { id: mutation.id });
                continue;
            }

            let outcome = match self.mutators.apply(
                self.docs.as_ref(),
                account,
                &mutation.name,
                &mutation.args,
            ) {
                Ok(()) => MutationOutcome::Applied { id: mutation.id },
                Err(ApplyError::Permanent(message)) => {
                    // Consumed, not retried: advance past it below.
                    warn!(
                        client_id,
                        mutation_id = mutation.id,
                        name = %mutation.name,
                        %message,
                        "permanent failure"
                    );
                    MutationOutcome::AppliedWithError {
                        id: mutation.id,
                        message,
                    }
                }
                Err(ApplyError::Store(e)) => return Err(e.into()),
            };

            // Conditional write: if another writer advanced the cursor
            // while we were applying, we must not blindly overwrite it.
            let advanced =
                self.state
                    .compare_and_set_mutation_id(account, client_id, cursor, expected)?;
            if !advanced {
                warn!(client_id, expected, "cursor contention, aborting batch");
                return Err(ServerError::CursorContention {
                    client_id: client_id.to_string(),
                });
            }

            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
